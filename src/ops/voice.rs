use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::{non_blank, parse_uuid, require};
use crate::context::AppContext;
use crate::entities::voice;
use crate::error::OpError;

#[derive(Debug)]
pub struct DeleteVoiceInput {
    pub uid: String,
    pub voice_id: String,
}

/// Deletes a voice: fetch the row, confirm the deletion with the vendor
/// webhook, only then remove the local pointer. Removing the row first would
/// leak a vendor-side voice with no local reference.
pub async fn delete_voice(ctx: &AppContext, input: DeleteVoiceInput) -> Result<(), OpError> {
    ctx.events.started(
        "delete_voice",
        &[("uid", &input.uid), ("voice_id", &input.voice_id)],
    );

    let uid = require(&input.uid, "user id")?;
    let voice_id = parse_uuid(&require(&input.voice_id, "voice id")?, "voice id")?;

    let row = voice::Entity::find()
        .filter(voice::Column::Id.eq(voice_id))
        .filter(voice::Column::Uid.eq(uid.as_str()))
        .one(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "delete_voice",
                "fetch voice",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?
        .ok_or_else(|| OpError::MissingData("voice not found".into()))?;

    let vendor_voice_id = non_blank(row.vendor_voice_id.as_deref())
        .ok_or_else(|| OpError::MissingData("voice has no vendor voice id".into()))?;

    if let Err(err) = ctx
        .vendor
        .notify_voice_deleted(vendor_voice_id, Some(&row.name), &uid)
        .await
    {
        ctx.events.failed(
            "delete_voice",
            "webhook",
            &err.to_string(),
            &[("uid", &uid), ("vendor_voice_id", vendor_voice_id)],
        );
        return Err(err);
    }

    voice::Entity::delete_many()
        .filter(voice::Column::Id.eq(voice_id))
        .filter(voice::Column::Uid.eq(uid.as_str()))
        .exec(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "delete_voice",
                "delete voice record",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?;

    ctx.events.succeeded("delete_voice", &[("uid", &uid)]);
    Ok(())
}

#[derive(Debug)]
pub struct UpdateVoiceInput {
    pub uid: String,
    pub voice_id: String,
    pub name: String,
    pub description: Option<String>,
}

pub async fn update_voice(ctx: &AppContext, input: UpdateVoiceInput) -> Result<(), OpError> {
    ctx.events.started(
        "update_voice",
        &[("uid", &input.uid), ("voice_id", &input.voice_id)],
    );

    let uid = require(&input.uid, "user id")?;
    let voice_id = parse_uuid(&require(&input.voice_id, "voice id")?, "voice id")?;
    let name = require(&input.name, "voice name")?;
    let description = non_blank(input.description.as_deref()).map(str::to_string);

    voice::Entity::update_many()
        .col_expr(voice::Column::Name, Expr::value(name))
        .col_expr(voice::Column::Description, Expr::value(description))
        .filter(voice::Column::Id.eq(voice_id))
        .filter(voice::Column::Uid.eq(uid.as_str()))
        .exec(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "update_voice",
                "update voice record",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?;

    ctx.events.succeeded("update_voice", &[("uid", &uid)]);
    Ok(())
}
