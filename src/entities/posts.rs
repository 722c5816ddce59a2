use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub headline: String,
    pub content: String,
    pub news_link: String,
    pub post_type: String,
    pub plan: Option<String>,
    pub caption: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_images::Entity")]
    PostImages,
}

impl Related<super::post_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostImages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
