pub mod download;
pub mod upload;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::storage::GuardedStore;

use super::app_data;

pub use upload::{UploadLimits, UploadRejection, UploadedFile, read_upload};

pub struct FileService {
    store: Option<GuardedStore>,
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self { store: None }
    }

    pub(crate) fn get_store(&self, request: &HttpRequest) -> Result<GuardedStore> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => app_data::<GuardedStore>(request, "GuardedStore"),
        }
    }

    // 按对象路径下载
    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        path: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, path).await
    }
}
