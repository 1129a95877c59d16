use crate::{
    db::query::{QueryFilter, QueryOptions},
    model::entity::EntityModel,
    sql::{SqlError, check_field_ref, check_identifier, join, sanitize::sanitize_order},
    value::Value,
};

///
/// BuiltStatement
///
/// Generated SQL text plus the bind values the builder collected, in
/// placeholder order. `bound_markers` is the number of leading
/// placeholders owed to join conditions; the adapter satisfies those
/// from its additional query parameters before any collected value.
///

#[derive(Debug)]
pub struct BuiltStatement {
    pub sql: String,
    pub values: Vec<Value>,
    pub bound_markers: usize,
}

impl BuiltStatement {
    const fn plain(sql: String, values: Vec<Value>) -> Self {
        Self {
            sql,
            values,
            bound_markers: 0,
        }
    }
}

///
/// SqlBuilder
/// Composes the four statement kinds from one entity's metadata.
///

pub struct SqlBuilder<'a> {
    model: &'a EntityModel,
}

impl<'a> SqlBuilder<'a> {
    #[must_use]
    pub const fn new(model: &'a EntityModel) -> Self {
        Self { model }
    }

    /// Multi-row SELECT from an equality filter and options.
    ///
    /// Filter keys without a qualifier are bound to the base table. An
    /// empty filter emits the `(1 = 1)` tautology so the statement is
    /// syntactically complete without special-casing downstream. LIMIT
    /// and OFFSET are formatted as plain integers, never bound, so each
    /// distinct pair is a distinct statement text.
    pub fn select(
        &self,
        filter: &QueryFilter,
        options: &QueryOptions,
    ) -> Result<BuiltStatement, SqlError> {
        let resolved = join::resolve(self.model)?;
        let mut sql = self.select_prefix(&resolved);

        let mut values = Vec::with_capacity(filter.len());
        if filter.is_empty() {
            sql.push_str(" WHERE (1 = 1)");
        } else {
            let mut terms = Vec::with_capacity(filter.len());
            for (key, value) in filter.entries() {
                check_field_ref(key)?;
                if key.contains('.') {
                    terms.push(format!("{key} = ?"));
                } else {
                    terms.push(format!("{}.{key} = ?", self.model.table));
                }
                values.push(value.clone());
            }
            sql.push_str(" WHERE ");
            sql.push_str(&terms.join(" AND "));
        }

        if let Some(order) = options.order.as_deref() {
            let cleaned = sanitize_order(order);
            if !cleaned.trim().is_empty() {
                sql.push_str(" ORDER BY ");
                sql.push_str(&cleaned);
            }
        }
        if let Some(limit) = options.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = options.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        Ok(BuiltStatement {
            sql,
            values,
            bound_markers: resolved.bound_markers,
        })
    }

    /// Single-row SELECT keyed by the full primary key, for load-style
    /// fills. Values must be supplied in primary-key declaration order.
    pub fn select_by_primary_key(
        &self,
        pk_values: Vec<Value>,
    ) -> Result<BuiltStatement, SqlError> {
        let resolved = join::resolve(self.model)?;
        let mut sql = self.select_prefix(&resolved);

        sql.push_str(" WHERE ");
        sql.push_str(&self.primary_key_terms(true)?.join(" AND "));

        Ok(BuiltStatement {
            sql,
            values: pk_values,
            bound_markers: resolved.bound_markers,
        })
    }

    /// INSERT over the given column/value pairs. Columns left off the
    /// list are absent from the statement entirely, so database-side
    /// defaults apply.
    pub fn insert(
        &self,
        columns: Vec<(&'static str, Value)>,
    ) -> Result<BuiltStatement, SqlError> {
        check_identifier(self.model.table)?;
        if columns.is_empty() {
            return Err(SqlError::EmptyColumnList {
                table: self.model.table,
            });
        }

        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        for (name, value) in columns {
            check_identifier(name)?;
            names.push(name);
            values.push(value);
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.model.table,
            names.join(", "),
            vec!["?"; values.len()].join(", ")
        );

        Ok(BuiltStatement::plain(sql, values))
    }

    /// UPDATE over every supplied assignment, keyed by the primary key.
    ///
    /// A null assignment becomes the literal `field = NULL` — explicit
    /// clearing, distinct from omission — and consumes no placeholder.
    pub fn update(
        &self,
        assignments: Vec<(&'static str, Value)>,
        pk_values: Vec<Value>,
    ) -> Result<BuiltStatement, SqlError> {
        check_identifier(self.model.table)?;
        if assignments.is_empty() {
            return Err(SqlError::EmptyColumnList {
                table: self.model.table,
            });
        }

        let mut set_terms = Vec::with_capacity(assignments.len());
        let mut values = Vec::with_capacity(assignments.len() + pk_values.len());
        for (name, value) in assignments {
            check_identifier(name)?;
            if value.is_null() {
                set_terms.push(format!("{name} = NULL"));
            } else {
                set_terms.push(format!("{name} = ?"));
                values.push(value);
            }
        }
        values.extend(pk_values);

        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.model.table,
            set_terms.join(", "),
            self.primary_key_terms(false)?.join(" AND ")
        );

        Ok(BuiltStatement::plain(sql, values))
    }

    /// DELETE keyed by the primary key. No joins, no reload.
    pub fn delete(&self, pk_values: Vec<Value>) -> Result<BuiltStatement, SqlError> {
        check_identifier(self.model.table)?;
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            self.model.table,
            self.primary_key_terms(false)?.join(" AND ")
        );

        Ok(BuiltStatement::plain(sql, pk_values))
    }

    fn select_prefix(&self, resolved: &join::ResolvedJoins) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            resolved.fields.join(", "),
            self.model.table
        );
        if !resolved.clause.is_empty() {
            sql.push(' ');
            sql.push_str(&resolved.clause);
        }
        sql
    }

    // Qualified terms for SELECT (joins may shadow names); bare terms
    // for UPDATE/DELETE where qualification is not portable SQL.
    fn primary_key_terms(&self, qualified: bool) -> Result<Vec<String>, SqlError> {
        let mut terms = Vec::with_capacity(self.model.primary_keys.len());
        for pk in self.model.primary_keys {
            check_identifier(pk)?;
            if qualified {
                terms.push(format!("{}.{pk} = ?", self.model.table));
            } else {
                terms.push(format!("{pk} = ?"));
            }
        }
        Ok(terms)
    }
}
