use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, DbConn, DbErr, EntityTrait, IdenStatic, IntoActiveModel, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait,
};

use quill_core::error::RepoError;
use quill_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Map a SeaORM error, surfacing unique/foreign-key violations as constraints.
pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint("Entity already exists".to_string())
    } else if err_str.contains("foreign key") {
        RepoError::Constraint("Referenced entity does not exist".to_string())
    } else if matches!(e, DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) {
        RepoError::Connection(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        // Domain entities carry their own ids, so saving is an upsert on the
        // primary key that rewrites every other column.
        let active_model: E::ActiveModel = entity.into();

        let pk_columns: Vec<E::Column> = E::PrimaryKey::iter()
            .map(|pk| pk.into_column())
            .collect();
        let on_conflict = OnConflict::columns(E::PrimaryKey::iter())
            .update_columns(
                E::Column::iter().filter(|c| !pk_columns.iter().any(|pk| pk.as_str() == c.as_str())),
            )
            .to_owned();

        let model = E::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
