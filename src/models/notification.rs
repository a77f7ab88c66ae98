// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Caixa de entrada por usuário. O canal realtime (Socket.IO no sistema
// original) entrega o mesmo formato; aqui só expomos o lado REST.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "Chamado atualizado")]
    pub title: String,

    pub message: String,

    #[schema(example = "info")]
    pub kind: String,

    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
