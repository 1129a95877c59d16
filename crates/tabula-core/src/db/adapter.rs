use crate::{
    db::{
        cache::StatementCache,
        driver::Driver,
        executor,
        query::{QueryFilter, QueryOptions},
    },
    error::MapperError,
    sql::builder::SqlBuilder,
    traits::Entity,
    value::Value,
};

///
/// Adapter
///
/// Façade composing the SQL builder, statement cache, and execution
/// engine over one driver instance. Owns the per-instance cache and the
/// additional query parameters consumed by bound-marker join
/// conditions.
///
/// The `try_*` methods expose the typed error surface; the plain
/// methods preserve the boolean/empty-result contract, absorbing engine
/// errors after logging them. `load` is the exception: its caller has
/// already committed to specific key values, so a failure there signals
/// infrastructure trouble and always propagates.
///

pub struct Adapter<D: Driver> {
    driver: D,
    cache: StatementCache<D::Stmt>,
    query_params: Vec<Value>,
}

impl<D: Driver> Adapter<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            cache: StatementCache::new(),
            query_params: Vec::new(),
        }
    }

    pub fn with_query_params(driver: D, query_params: Vec<Value>) -> Self {
        Self {
            driver,
            cache: StatementCache::new(),
            query_params,
        }
    }

    pub fn push_query_param(&mut self, value: impl Into<Value>) {
        self.query_params.push(value.into());
    }

    /// Number of distinct prepared statements held by this adapter.
    #[must_use]
    pub fn cached_statements(&self) -> usize {
        self.cache.len()
    }

    // ---- typed engine surface -------------------------------------

    /// Multi-row query hydrated through the entity's blank constructor.
    pub fn try_query<E: Entity>(
        &mut self,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<Vec<E>, MapperError> {
        self.try_query_with(filter, options, E::hydrate)
    }

    /// Multi-row query hydrated through a caller-supplied row factory
    /// (the constructor-arguments mechanism).
    pub fn try_query_with<E, F>(
        &mut self,
        filter: &QueryFilter,
        options: &QueryOptions,
        factory: F,
    ) -> Result<Vec<E>, MapperError>
    where
        E: Entity,
        F: FnMut() -> E,
    {
        let built = SqlBuilder::new(E::MODEL).select(filter, options)?;
        let values = self.assemble_values(built.bound_markers, built.values)?;
        let stmt = self.cache.get_or_prepare(&mut self.driver, &built.sql)?;
        let rows = executor::run_query(stmt, &built.sql, values)?;

        Ok(executor::hydrate_rows(rows, factory))
    }

    /// Fill an existing instance from its primary key.
    ///
    /// Every primary-key field must carry a value before any SQL is
    /// built. Zero matching rows is not an error: the instance is left
    /// unfilled and still marked clean, exactly like a one-row fill.
    pub fn load<E: Entity>(&mut self, entity: &mut E) -> Result<(), MapperError> {
        let pk_values = Self::primary_key_values(entity)?;
        let built = SqlBuilder::new(E::MODEL).select_by_primary_key(pk_values)?;
        let values = self.assemble_values(built.bound_markers, built.values)?;
        let stmt = self.cache.get_or_prepare(&mut self.driver, &built.sql)?;
        let rows = executor::run_query(stmt, &built.sql, values)?;

        executor::fill_first(entity, rows);
        entity.mark_clean();
        Ok(())
    }

    /// INSERT the instance's set, non-computed fields. Unset fields are
    /// omitted so database-side defaults apply. With a single-field
    /// primary key, the database-assigned identifier is fetched,
    /// assigned when the key was not caller-supplied, and the instance
    /// is reloaded to pick up defaults.
    pub fn try_create<E: Entity>(&mut self, entity: &mut E) -> Result<(), MapperError> {
        let mut columns = Vec::new();
        for field in E::MODEL.fields {
            if field.is_computed() {
                continue;
            }
            if let Some(value) = entity.get(field.name)
                && !value.is_null()
            {
                columns.push((field.name, value));
            }
        }

        let built = SqlBuilder::new(E::MODEL).insert(columns)?;
        let stmt = self.cache.get_or_prepare(&mut self.driver, &built.sql)?;
        executor::run_execute(stmt, &built.sql, built.values)?;

        if let &[pk] = E::MODEL.primary_keys {
            let key_missing = entity.get(pk).is_none_or(|v| v.is_null());
            if key_missing {
                match self.driver.last_insert_id(E::MODEL.table) {
                    Ok(id) if !id.is_null() => entity.set(pk, id),
                    // No identifier assigned; nothing to reload by.
                    Ok(_) => return Ok(()),
                    Err(err) if err.is_unsupported() => {
                        // Auto-increment retrieval is optional per backend.
                        log::debug!("last-insert-id unsupported for {}: {err}", E::MODEL.table);
                        return Ok(());
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            self.load(entity)?;
        }

        Ok(())
    }

    /// UPDATE every present, non-computed field: non-null values bind,
    /// explicit nulls clear with a `NULL` literal. Reloads on success so
    /// database-side changes are reflected on the instance.
    pub fn try_update<E: Entity>(&mut self, entity: &mut E) -> Result<(), MapperError> {
        let mut assignments = Vec::new();
        for field in E::MODEL.fields {
            if field.is_computed() {
                continue;
            }
            if let Some(value) = entity.get(field.name) {
                assignments.push((field.name, value));
            }
        }

        let pk_values = Self::primary_key_values(entity)?;
        let built = SqlBuilder::new(E::MODEL).update(assignments, pk_values)?;
        let stmt = self.cache.get_or_prepare(&mut self.driver, &built.sql)?;
        executor::run_execute(stmt, &built.sql, built.values)?;

        self.load(entity)
    }

    /// DELETE by primary key. No join resolution, no reload.
    pub fn try_delete<E: Entity>(&mut self, entity: &E) -> Result<(), MapperError> {
        let pk_values = Self::primary_key_values(entity)?;
        let built = SqlBuilder::new(E::MODEL).delete(pk_values)?;
        let stmt = self.cache.get_or_prepare(&mut self.driver, &built.sql)?;
        executor::run_execute(stmt, &built.sql, built.values)?;
        Ok(())
    }

    // ---- absorbing façade -----------------------------------------

    /// `None` is the distinguished engine-failure value; callers cannot
    /// (and by contract need not) distinguish failure causes here.
    pub fn query<E: Entity>(
        &mut self,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Option<Vec<E>> {
        match self.try_query(filter, options) {
            Ok(rows) => Some(rows),
            Err(err) => {
                log::warn!("query on {} failed: {err}", E::MODEL.table);
                None
            }
        }
    }

    pub fn create<E: Entity>(&mut self, entity: &mut E) -> bool {
        match self.try_create(entity) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("create on {} failed: {err}", E::MODEL.table);
                false
            }
        }
    }

    pub fn update<E: Entity>(&mut self, entity: &mut E) -> bool {
        match self.try_update(entity) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("update on {} failed: {err}", E::MODEL.table);
                false
            }
        }
    }

    pub fn delete<E: Entity>(&mut self, entity: &E) -> bool {
        match self.try_delete(entity) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("delete on {} failed: {err}", E::MODEL.table);
                false
            }
        }
    }

    // ---- internals ------------------------------------------------

    // Bound-marker join conditions consume adapter-held parameters,
    // prepended ahead of the builder's collected values to match
    // placeholder order in the statement text.
    fn assemble_values(
        &self,
        bound_markers: usize,
        values: Vec<Value>,
    ) -> Result<Vec<Value>, MapperError> {
        if bound_markers == 0 {
            return Ok(values);
        }
        if self.query_params.len() < bound_markers {
            return Err(MapperError::invariant(format!(
                "join clause consumes {bound_markers} query parameters, {} held",
                self.query_params.len()
            )));
        }

        let mut assembled = self.query_params[..bound_markers].to_vec();
        assembled.extend(values);
        Ok(assembled)
    }

    fn primary_key_values<E: Entity>(entity: &E) -> Result<Vec<Value>, MapperError> {
        let mut values = Vec::with_capacity(E::MODEL.primary_keys.len());
        for &pk in E::MODEL.primary_keys {
            match entity.get(pk) {
                Some(value) if !value.is_null() => values.push(value),
                _ => {
                    return Err(MapperError::MissingPrimaryKey {
                        table: E::MODEL.table,
                        field: pk,
                    });
                }
            }
        }
        Ok(values)
    }
}
