/**
 * Database Operations for Chat Messages
 *
 * PostgreSQL-backed `MessageStore`. Messages live in `chat_messages`
 * (see `migrations/`) and are read back ordered by the `seq` serial column, so
 * history order is insertion order.
 */

use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::chat::store::MessageStore;
use crate::backend::error::BackendError;
use crate::shared::message::{ChatAuthor, ChatMessage, ChatText};

/// Row shape of `chat_messages`
#[derive(Debug, sqlx::FromRow)]
struct ChatMessageRow {
    author_id: String,
    nombre: String,
    apellido: String,
    edad: Option<i32>,
    avatar: String,
    mensaje: String,
    fecha: String,
    hora: String,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        Self {
            author: ChatAuthor {
                id: row.author_id,
                name: row.nombre,
                surname: row.apellido,
                age: row.edad.and_then(|age| u32::try_from(age).ok()),
                avatar: row.avatar,
            },
            text: ChatText {
                body: row.mensaje,
                date: row.fecha,
                time: row.hora,
            },
        }
    }
}

/// PostgreSQL message store
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn append(&self, message: &ChatMessage) -> Result<(), BackendError> {
        let edad = message
            .author
            .age
            .map(i32::try_from)
            .transpose()
            .map_err(|_| BackendError::storage("age does not fit the edad column"))?;

        sqlx::query(
            r#"
            INSERT INTO chat_messages (author_id, nombre, apellido, edad, avatar, mensaje, fecha, hora)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#
        )
        .bind(&message.author.id)
        .bind(&message.author.name)
        .bind(&message.author.surname)
        .bind(edad)
        .bind(&message.author.avatar)
        .bind(&message.text.body)
        .bind(&message.text.date)
        .bind(&message.text.time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ChatMessage>, BackendError> {
        let rows = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            SELECT author_id, nombre, apellido, edad, avatar, mensaje, fecha, hora
            FROM chat_messages
            ORDER BY seq ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }
}
