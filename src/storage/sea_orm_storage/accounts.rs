use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use super::SeaOrmStorage;
use crate::entity::accounts::{ActiveModel, Column, Entity as Accounts};
use crate::entity::profiles::ActiveModel as ProfileActiveModel;
use crate::errors::{AppError, Result};
use crate::models::auth::Account;
use crate::models::profiles::entities::Profile;

impl SeaOrmStorage {
    /// 创建账号，个人资料在同一事务内生成
    ///
    /// 资料写入失败时事务回滚，账号不会单独留下。
    pub async fn create_account_impl(
        &self,
        account: Account,
        full_name: Option<String>,
    ) -> Result<(Account, Profile)> {
        let profile = Profile::bootstrap(account.id, full_name.as_deref(), &account.email);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::database_operation(format!("开启事务失败: {e}")))?;

        let account = ActiveModel::from(&account)
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_db(e, "创建账号失败"))?
            .into_account();

        let profile = ProfileActiveModel::from(&profile)
            .insert(&txn)
            .await
            .map_err(|e| AppError::from_db(e, "创建个人资料失败"))?
            .into_profile();

        txn.commit()
            .await
            .map_err(|e| AppError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((account, profile))
    }

    pub async fn get_account_by_id_impl(&self, id: Uuid) -> Result<Option<Account>> {
        let result = Accounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询账号失败"))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过邮箱获取账号（不区分大小写）
    pub async fn get_account_by_email_impl(&self, email: &str) -> Result<Option<Account>> {
        let result = Accounts::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "查询账号失败"))?;

        Ok(result.map(|m| m.into_account()))
    }

    pub async fn delete_account_impl(&self, id: Uuid) -> Result<bool> {
        let result = Accounts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::from_db(e, "删除账号失败"))?;

        Ok(result.rows_affected > 0)
    }
}
