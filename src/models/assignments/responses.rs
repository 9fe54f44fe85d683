use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::PaginationInfo;

/// 作业列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "api/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}
