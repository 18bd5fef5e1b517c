use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Value};

use super::{non_blank, parse_uuid, require};
use crate::context::AppContext;
use crate::entities::photo_avatar;
use crate::error::OpError;

#[derive(Debug, Default)]
pub struct DeleteAvatarInput {
    pub uid: String,
    pub record_id: Option<String>,
    pub group_id: Option<String>,
    pub image_key: Option<String>,
}

/// The single equality filter applied to the local delete, chosen from an
/// ordered candidate list: record id first, then vendor group id, then the
/// source image key. Exactly one is used, never a union.
pub(crate) fn avatar_filter(
    input: &DeleteAvatarInput,
) -> Result<(photo_avatar::Column, Value), OpError> {
    let candidates = [
        (photo_avatar::Column::Id, input.record_id.as_deref()),
        (photo_avatar::Column::GroupId, input.group_id.as_deref()),
        (photo_avatar::Column::ImageKey, input.image_key.as_deref()),
    ];

    for (column, candidate) in candidates {
        if let Some(value) = non_blank(candidate) {
            return match column {
                photo_avatar::Column::Id => {
                    let id = parse_uuid(value, "record id")?;
                    Ok((column, id.into()))
                }
                _ => Ok((column, value.to_string().into())),
            };
        }
    }

    Err(OpError::Validation("no avatar identifier provided".into()))
}

/// Deletes an avatar, vendor side first. The vendor treats a missing group as
/// already deleted; a refused delete aborts before the local row is touched,
/// so a vendor group is never orphaned by a half-finished delete.
pub async fn delete_avatar(ctx: &AppContext, input: DeleteAvatarInput) -> Result<(), OpError> {
    ctx.events.started("delete_avatar", &[("uid", &input.uid)]);

    let uid = require(&input.uid, "user id")?;
    let (column, value) = avatar_filter(&input)?;

    if let Some(group_id) = non_blank(input.group_id.as_deref()) {
        if let Err(err) = ctx.vendor.delete_avatar_group(group_id).await {
            ctx.events.failed(
                "delete_avatar",
                "vendor delete",
                &err.to_string(),
                &[("uid", &uid), ("group_id", group_id)],
            );
            return Err(err);
        }
    }

    // A delete matching zero rows is still a success: deleting something
    // already gone is not an error.
    photo_avatar::Entity::delete_many()
        .filter(photo_avatar::Column::Uid.eq(uid.as_str()))
        .filter(Expr::col(column).eq(value))
        .exec(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "delete_avatar",
                "delete photo_avatars",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?;

    ctx.events.succeeded("delete_avatar", &[("uid", &uid)]);
    Ok(())
}

#[derive(Debug)]
pub struct RenameAvatarInput {
    pub uid: String,
    pub record_id: String,
    pub new_name: String,
}

pub async fn rename_avatar(ctx: &AppContext, input: RenameAvatarInput) -> Result<(), OpError> {
    ctx.events.started(
        "rename_avatar",
        &[("uid", &input.uid), ("record_id", &input.record_id)],
    );

    let uid = require(&input.uid, "user id")?;
    let record_id = parse_uuid(&require(&input.record_id, "record id")?, "record id")?;
    let name = require(&input.new_name, "avatar name")?;

    photo_avatar::Entity::update_many()
        .col_expr(photo_avatar::Column::Name, Expr::value(name))
        .filter(photo_avatar::Column::Id.eq(record_id))
        .filter(photo_avatar::Column::Uid.eq(uid.as_str()))
        .exec(&ctx.db)
        .await
        .map_err(|err| {
            ctx.events.failed(
                "rename_avatar",
                "update photo_avatars",
                &err.to_string(),
                &[("uid", &uid)],
            );
            OpError::Database(err.to_string())
        })?;

    ctx.events.succeeded("rename_avatar", &[("uid", &uid)]);
    Ok(())
}
