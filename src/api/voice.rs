use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use serde::Deserialize;

use crate::context::AppContext;
use crate::envelope::{Empty, Envelope};
use crate::ops::voice::{self, DeleteVoiceInput, UpdateVoiceInput};

#[derive(Deserialize)]
pub struct DeleteVoiceRequest {
    pub uid: String,
    pub voice_id: String,
}

pub async fn delete_voice(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<DeleteVoiceRequest>,
) -> Envelope<Empty> {
    voice::delete_voice(
        &ctx,
        DeleteVoiceInput {
            uid: payload.uid,
            voice_id: payload.voice_id,
        },
    )
    .await
    .map(|_| Empty {})
    .into()
}

#[derive(Deserialize)]
pub struct UpdateVoiceRequest {
    pub uid: String,
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

pub async fn update_voice(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(payload): Json<UpdateVoiceRequest>,
) -> Envelope<Empty> {
    voice::update_voice(
        &ctx,
        UpdateVoiceInput {
            uid: payload.uid,
            voice_id: payload.voice_id,
            name: payload.name,
            description: payload.description,
        },
    )
    .await
    .map(|_| Empty {})
    .into()
}
