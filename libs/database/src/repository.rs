//! Generic CRUD over a SeaORM entity, shared by the domain repositories.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PrimaryKeyTrait, QueryFilter,
};
use std::marker::PhantomData;

pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<E: EntityTrait> BaseRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(&self.db).await
    }

    /// Inserts without `RETURNING *`, so columns the driver cannot decode
    /// (pgvector) never come back.
    pub async fn insert<A>(&self, model: A) -> Result<(), DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
    {
        E::insert(model).exec_without_returning(&self.db).await?;
        Ok(())
    }

    /// Writes the `Set` fields of `model` to rows matching `filter`.
    /// Returns the number of rows changed.
    pub async fn update_where<A, F>(&self, model: A, filter: F) -> Result<u64, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        F: sea_orm::sea_query::IntoCondition,
    {
        let result = E::update_many()
            .set(model)
            .filter(filter)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
