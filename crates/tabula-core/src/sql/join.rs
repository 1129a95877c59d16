use crate::{
    model::{entity::EntityModel, relation::RelationKind},
    sql::{
        SqlError, check_identifier,
        condition::{JoinTarget, parse_relation_entry},
    },
};

///
/// ResolvedJoins
///
/// Output of join resolution: the clause to append to the FROM
/// identifier, the rewritten SELECT field list, and the number of
/// bound-parameter markers the clause consumes.
///

#[derive(Debug)]
pub struct ResolvedJoins {
    pub clause: String,
    pub fields: Vec<String>,
    pub bound_markers: usize,
}

/// Resolve relationship metadata into a join clause and a rewritten
/// field list.
///
/// Categories are walked in fixed precedence order (`require` then
/// `include`), preserving declaration order within each category;
/// fragment ordering is significant when joins reference each other.
/// Each entry's condition text is re-parsed through the shared
/// declaration syntax.
///
/// Field rewriting is independent of join construction: every field
/// with a `from` expression becomes `<from> AS <name>`, all others are
/// base-table qualified.
pub fn resolve(model: &EntityModel) -> Result<ResolvedJoins, SqlError> {
    check_identifier(model.table)?;

    let mut fragments = Vec::new();
    let mut bound_markers = 0usize;

    for kind in [RelationKind::Require, RelationKind::Include] {
        for relation in model.relations.iter().filter(|r| r.kind == kind) {
            let entry = parse_relation_entry(relation.table, relation.on)?;

            let mut terms = Vec::with_capacity(entry.conditions.len());
            for condition in &entry.conditions {
                match &condition.target {
                    JoinTarget::Bound => {
                        bound_markers += 1;
                        terms.push(format!("{}.{} = ?", entry.table, condition.column));
                    }
                    JoinTarget::Column(base_column) => {
                        terms.push(format!(
                            "{}.{} = {}.{}",
                            entry.table, condition.column, model.table, base_column
                        ));
                    }
                }
            }

            let keyword = match kind {
                RelationKind::Require => "JOIN",
                RelationKind::Include => "LEFT JOIN",
            };
            fragments.push(format!(
                "{keyword} {} ON ({})",
                entry.table,
                terms.join(" AND ")
            ));
        }
    }

    let mut fields = Vec::with_capacity(model.fields.len());
    for field in model.fields {
        check_identifier(field.name)?;
        match field.from {
            Some(expr) => fields.push(format!("{expr} AS {}", field.name)),
            None => fields.push(format!("{}.{}", model.table, field.name)),
        }
    }

    Ok(ResolvedJoins {
        clause: fragments.join(" "),
        fields,
        bound_markers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{field::FieldModel, relation::RelationModel};

    static PLAIN_FIELDS: &[FieldModel] = &[FieldModel::new("id"), FieldModel::new("name")];

    static NO_RELATIONS: EntityModel = EntityModel {
        table: "users",
        fields: PLAIN_FIELDS,
        primary_keys: &["id"],
        relations: &[],
    };

    static MIXED_RELATIONS: EntityModel = EntityModel {
        table: "users",
        fields: PLAIN_FIELDS,
        primary_keys: &["id"],
        relations: &[
            RelationModel::include("profiles", "user_id => id"),
            RelationModel::require("accounts", "id => account_id"),
        ],
    };

    static COMPUTED_FIELDS: &[FieldModel] = &[
        FieldModel::new("id"),
        FieldModel::computed("post_count", "count(posts.id)"),
    ];

    static COMPUTED: EntityModel = EntityModel {
        table: "users",
        fields: COMPUTED_FIELDS,
        primary_keys: &["id"],
        relations: &[],
    };

    static BOUND: EntityModel = EntityModel {
        table: "users",
        fields: PLAIN_FIELDS,
        primary_keys: &["id"],
        relations: &[RelationModel::require(
            "accounts",
            "id => account_id, status => ?",
        )],
    };

    #[test]
    fn zero_relations_yield_empty_clause_and_qualified_fields() {
        let resolved = resolve(&NO_RELATIONS).expect("resolve should succeed");
        assert!(resolved.clause.is_empty());
        assert_eq!(resolved.fields, vec!["users.id", "users.name"]);
        assert_eq!(resolved.bound_markers, 0);
    }

    #[test]
    fn require_precedes_include_regardless_of_declaration_interleaving() {
        let resolved = resolve(&MIXED_RELATIONS).expect("resolve should succeed");
        assert_eq!(
            resolved.clause,
            "JOIN accounts ON (accounts.id = users.account_id) \
             LEFT JOIN profiles ON (profiles.user_id = users.id)"
        );

        // Exactly one of each keyword, never reversed.
        assert_eq!(resolved.clause.matches("LEFT JOIN").count(), 1);
        assert_eq!(resolved.clause.matches("JOIN").count(), 2); // "LEFT JOIN" contains "JOIN"
        let join_at = resolved.clause.find("JOIN accounts").expect("inner join");
        let left_at = resolved.clause.find("LEFT JOIN").expect("left join");
        assert!(join_at < left_at);
    }

    #[test]
    fn from_expression_rewrites_to_aliased_column() {
        let resolved = resolve(&COMPUTED).expect("resolve should succeed");
        assert_eq!(resolved.fields[1], "count(posts.id) AS post_count");
    }

    #[test]
    fn bound_marker_emits_placeholder_and_is_counted() {
        let resolved = resolve(&BOUND).expect("resolve should succeed");
        assert_eq!(
            resolved.clause,
            "JOIN accounts ON (accounts.id = users.account_id AND accounts.status = ?)"
        );
        assert_eq!(resolved.bound_markers, 1);
    }

    #[test]
    fn nested_relation_entry_resolves_after_unwrap() {
        static NESTED: EntityModel = EntityModel {
            table: "users",
            fields: PLAIN_FIELDS,
            primary_keys: &["id"],
            relations: &[RelationModel::nested(
                RelationKind::Require,
                "(accounts: id => account_id)",
            )],
        };

        let resolved = resolve(&NESTED).expect("resolve should succeed");
        assert_eq!(
            resolved.clause,
            "JOIN accounts ON (accounts.id = users.account_id)"
        );
    }
}
