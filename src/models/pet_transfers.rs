use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
    Canceled,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Approved => "approved",
            TransferStatus::Rejected => "rejected",
            TransferStatus::Canceled => "canceled",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        match raw {
            "pending" => Ok(TransferStatus::Pending),
            "approved" => Ok(TransferStatus::Approved),
            "rejected" => Ok(TransferStatus::Rejected),
            "canceled" => Ok(TransferStatus::Canceled),
            other => Err(ServiceError::Validation(format!(
                "unknown transfer status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PetTransferRow {
    pub transfer_id: String,
    pub pet_id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub status: String,
    pub message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
