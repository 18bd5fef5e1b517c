use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VideoTemp::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoTemp::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoTemp::Uid).string().not_null())
                    .col(ColumnDef::new(VideoTemp::VideoTitle).string().not_null())
                    .col(
                        ColumnDef::new(VideoTemp::CanvasInfo)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VideoTemp::CreatedAt)
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
                    .name("idx_video_temp_uid")
                    .table(VideoTemp::Table)
                    .col(VideoTemp::Uid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VideoTemp::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum VideoTemp {
    #[iden = "video_temp"]
    Table,
    Id,
    Uid,
    VideoTitle,
    CanvasInfo,
    CreatedAt,
}
