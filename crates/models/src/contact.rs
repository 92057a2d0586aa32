use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub mobile: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values written by both insert and full replace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactColumns {
    pub name: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub mobile: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub group_id: Option<String>,
}

impl ContactColumns {
    fn into_active_model(self, id: Uuid) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            name: Set(self.name),
            image_url: Set(self.image_url),
            email: Set(self.email),
            mobile: Set(self.mobile),
            company: Set(self.company),
            title: Set(self.title),
            group_id: Set(self.group_id),
        }
    }

    fn apply(self, am: &mut ActiveModel) {
        am.name = Set(self.name);
        am.image_url = Set(self.image_url);
        am.email = Set(self.email);
        am.mobile = Set(self.mobile);
        am.company = Set(self.company);
        am.title = Set(self.title);
        am.group_id = Set(self.group_id);
    }
}

pub fn validate_columns(c: &ContactColumns) -> Result<(), ModelError> {
    if c.name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    if c.mobile.trim().is_empty() { return Err(ModelError::Validation("mobile required".into())); }
    Ok(())
}

/// All rows in the order the database returns them.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_mobile(db: &DatabaseConnection, mobile: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Mobile.eq(mobile)).one(db).await?)
}

/// Insert a new row with a fresh id. A taken mobile surfaces as `ModelError::Duplicate`.
pub async fn create(db: &DatabaseConnection, columns: ContactColumns) -> Result<Model, ModelError> {
    validate_columns(&columns)?;
    let am = columns.into_active_model(Uuid::new_v4());
    Ok(am.insert(db).await?)
}

/// Overwrite every column of an existing row. `Ok(None)` when the id is unknown.
pub async fn replace(db: &DatabaseConnection, id: Uuid, columns: ContactColumns) -> Result<Option<Model>, ModelError> {
    validate_columns(&columns)?;
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    columns.apply(&mut am);
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        // row vanished between the lookup and the write
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a row, returning its last snapshot. `Ok(None)` when the id is unknown.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok((res.rows_affected > 0).then_some(existing))
}
