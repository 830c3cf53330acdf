use derive_new::new;

use crate::model::id::UserId;

#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct CreateNotification {
    pub user_id: UserId,
    pub kind: String,
    pub message: String,
}
