use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhotoAvatar::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PhotoAvatar::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PhotoAvatar::Uid).string().not_null())
                    .col(ColumnDef::new(PhotoAvatar::GroupId).string())
                    .col(ColumnDef::new(PhotoAvatar::ImageKey).string())
                    .col(ColumnDef::new(PhotoAvatar::Name).string().not_null())
                    .col(
                        ColumnDef::new(PhotoAvatar::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photo_avatars_uid")
                    .table(PhotoAvatar::Table)
                    .col(PhotoAvatar::Uid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Voice::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Voice::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Voice::Uid).string().not_null())
                    .col(ColumnDef::new(Voice::VendorVoiceId).string())
                    .col(ColumnDef::new(Voice::Name).string().not_null())
                    .col(ColumnDef::new(Voice::Description).text())
                    .col(
                        ColumnDef::new(Voice::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_voices_uid")
                    .table(Voice::Table)
                    .col(Voice::Uid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Video::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Video::Uid).string().not_null())
                    .col(ColumnDef::new(Video::VideoTitle).string().not_null())
                    .col(ColumnDef::new(Video::Status).string().not_null())
                    .col(ColumnDef::new(Video::Url).text())
                    .col(
                        ColumnDef::new(Video::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_videos_uid")
                    .table(Video::Table)
                    .col(Video::Uid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Video::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Voice::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PhotoAvatar::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PhotoAvatar {
    #[iden = "photo_avatars"]
    Table,
    Id,
    Uid,
    GroupId,
    ImageKey,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Voice {
    #[iden = "voices"]
    Table,
    Id,
    Uid,
    VendorVoiceId,
    Name,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Video {
    #[iden = "videos"]
    Table,
    Id,
    Uid,
    VideoTitle,
    Status,
    Url,
    CreatedAt,
}
