// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Taxonomy-driven relationship steps shared by every usecase
//!
//! Each usecase validates its inputs first and then runs a sequence of the
//! steps below. The steps only touch the graph once their inputs are known to
//! be valid, so a failing usecase leaves the graph as it found it.

use crate::guid;
use ifc_lite_model::{
    AttributeValue, EntityId, EntityResolver, EntityResolverExt, GraphError, IfcType,
    RelationshipKind, RelationshipRule, Result,
};
use ifc_lite_store::{owner, EntityGraph};

/// Taxonomy row for a kind, adjusted to the graph's schema
pub(crate) fn rule(graph: &EntityGraph, kind: RelationshipKind) -> RelationshipRule {
    RelationshipRule::for_schema(kind, graph.schema())
}

/// Ordered members of a relationship
pub(crate) fn members(
    resolver: &dyn EntityResolver,
    rule: &RelationshipRule,
    rel: EntityId,
) -> Vec<EntityId> {
    resolver
        .get(rel)
        .map(|e| e.get_refs(rule.related_attribute))
        .unwrap_or_default()
}

/// Relating side of a relationship
pub(crate) fn relating_of(
    resolver: &dyn EntityResolver,
    rule: &RelationshipRule,
    rel: EntityId,
) -> Option<EntityId> {
    match rule.relating_attribute {
        Some(attribute) => resolver.get(rel).and_then(|e| e.get_ref(attribute)),
        None => resolver.get(rel).map(|e| e.id),
    }
}

/// Relationships of a kind listing `member` on their related side
pub(crate) fn relationships_of(
    resolver: &dyn EntityResolver,
    rule: &RelationshipRule,
    member: EntityId,
) -> Vec<EntityId> {
    resolver
        .inverse_of_type(member, &rule.rel_type)
        .into_iter()
        .filter(|rel| members(resolver, rule, *rel).contains(&member))
        .collect()
}

/// Relationships of a kind whose relating side is `relating`
pub(crate) fn relationships_for(
    resolver: &dyn EntityResolver,
    rule: &RelationshipRule,
    relating: EntityId,
) -> Vec<EntityId> {
    if rule.is_self_relating() {
        return if resolver.is_a(relating, &rule.rel_type) {
            vec![relating]
        } else {
            Vec::new()
        };
    }
    resolver
        .inverse_of_type(relating, &rule.rel_type)
        .into_iter()
        .filter(|rel| relating_of(resolver, rule, *rel) == Some(relating))
        .collect()
}

/// Check that `relating` may own relationships of this kind
pub(crate) fn validate_relating(
    graph: &EntityGraph,
    rule: &RelationshipRule,
    relating: EntityId,
) -> Result<()> {
    graph.get_as(relating, &rule.relating_class).map(|_| ())
}

/// Check that every member exists and may sit on the related side
pub(crate) fn validate_members(
    graph: &EntityGraph,
    rule: &RelationshipRule,
    members: &[EntityId],
) -> Result<()> {
    for &member in members {
        let entity = graph.get_or_err(member)?;
        if !rule.accepts_related(&entity.ifc_type) {
            let expected: Vec<&str> = rule.related_classes.iter().map(|c| c.name()).collect();
            return Err(GraphError::type_mismatch(
                member,
                expected.join(" | "),
                &entity.ifc_type,
            ));
        }
    }
    Ok(())
}

/// Members in first-seen order without repeats
pub(crate) fn dedup(ids: &[EntityId]) -> Vec<EntityId> {
    let mut out: Vec<EntityId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

/// Reject decomposition cycles: `relating` may not sit below any member
/// through relationships of the same kind.
pub(crate) fn check_acyclic(
    graph: &EntityGraph,
    rule: &RelationshipRule,
    members: &[EntityId],
    relating: EntityId,
) -> Result<()> {
    let mut current = Some(relating);
    let mut steps = 0;
    while let Some(node) = current {
        if members.contains(&node) {
            return Err(GraphError::invalid_argument(
                rule.relating_attribute.unwrap_or("relating"),
                format!("{node} cannot be related to itself or its own descendants"),
            ));
        }
        steps += 1;
        if steps > graph.len() {
            break;
        }
        current = relationships_of(graph, rule, node)
            .first()
            .and_then(|rel| relating_of(graph, rule, *rel));
    }
    Ok(())
}

/// Create a new relationship entity for `relating` with `members`
fn create(
    graph: &mut EntityGraph,
    rule: &RelationshipRule,
    relating: EntityId,
    members: &[EntityId],
) -> Result<EntityId> {
    let attribute = rule
        .relating_attribute
        .ok_or_else(|| GraphError::cardinality(rule.kind, "relating entity has no relationship"))?;

    let history = owner::create_history(graph)?;
    if history.is_none() && rule.requires_owner_history {
        log::warn!(
            "{} created without owner history, required by {}",
            rule.rel_type,
            graph.schema()
        );
    }

    let created = graph.create_with(
        rule.rel_type.clone(),
        [
            ("GlobalId", AttributeValue::String(guid::new())),
            ("OwnerHistory", history.into()),
            (attribute, relating.into()),
            (
                rule.related_attribute,
                AttributeValue::refs(members.iter().copied()),
            ),
        ],
    );
    match created {
        Ok(rel) => {
            log::debug!("created {} {} for {}", rule.rel_type, rel, relating);
            Ok(rel)
        }
        Err(e) => {
            if let Some(history) = history {
                graph.remove_deep(history)?;
            }
            Err(e)
        }
    }
}

/// Add members to the relationship owned by `relating`, creating it when
/// there is none. Members already present are not duplicated; order of the
/// existing members is kept and new ones are appended.
pub(crate) fn attach(
    graph: &mut EntityGraph,
    rule: &RelationshipRule,
    relating: EntityId,
    new_members: &[EntityId],
) -> Result<EntityId> {
    let Some(rel) = relationships_for(graph, rule, relating).first().copied() else {
        return create(graph, rule, relating, &dedup(new_members));
    };

    let mut current = members(graph, rule, rel);
    let before = current.len();
    for member in new_members {
        if !current.contains(member) {
            current.push(*member);
        }
    }
    if current.len() != before {
        graph.set_attribute(rel, rule.related_attribute, AttributeValue::refs(current.clone()))?;
        owner::touch(graph, rel)?;
        log::debug!("appended {} members to {}", current.len() - before, rel);
    }
    Ok(rel)
}

/// Remove members from a relationship, preserving the order of the rest.
///
/// A relationship left without members is removed together with its
/// exclusively owned history, except where the relationship entity is itself
/// the owner (layers), which is kept with an empty list. Returns true if the
/// relationship was removed.
pub(crate) fn prune(
    graph: &mut EntityGraph,
    rule: &RelationshipRule,
    rel: EntityId,
    removed: &[EntityId],
) -> Result<bool> {
    let current = members(graph, rule, rel);
    let remaining: Vec<EntityId> = current
        .iter()
        .copied()
        .filter(|m| !removed.contains(m))
        .collect();
    if remaining.len() == current.len() {
        return Ok(false);
    }

    if remaining.is_empty() && !rule.is_self_relating() {
        remove_relationship(graph, rel)?;
        return Ok(true);
    }

    graph.set_attribute(rel, rule.related_attribute, AttributeValue::refs(remaining))?;
    owner::touch(graph, rel)?;
    Ok(false)
}

/// Delete a relationship entity and its exclusively owned history without
/// touching the entities it related.
pub(crate) fn remove_relationship(graph: &mut EntityGraph, rel: EntityId) -> Result<()> {
    remove_with_history(graph, rel)?;
    log::debug!("removed relationship {}", rel);
    Ok(())
}

/// Remove an entity, then deep-remove its owner history if nothing else
/// uses it.
pub(crate) fn remove_with_history(graph: &mut EntityGraph, id: EntityId) -> Result<()> {
    let history = graph.get(id).and_then(|e| e.get_ref("OwnerHistory"));
    graph.remove(id)?;
    if let Some(history) = history {
        owner::remove_if_orphaned(graph, history)?;
    }
    Ok(())
}

/// Relate `members` to `relating` under a single-ownership kind.
///
/// Members already related elsewhere are pruned from their previous
/// relationship first. If every member is already exclusively related to
/// `relating`, the existing relationship is returned unchanged.
pub(crate) fn assign_exclusive(
    graph: &mut EntityGraph,
    rule: &RelationshipRule,
    new_members: &[EntityId],
    relating: EntityId,
) -> Result<EntityId> {
    rule.validate()?;
    require_members(rule, new_members)?;
    if !rule.exclusive {
        return Err(GraphError::cardinality(
            rule.kind,
            "shared relationships cannot be assigned exclusively",
        ));
    }

    let target = relationships_for(graph, rule, relating).first().copied();
    let mut pending = Vec::new();
    for member in dedup(new_members) {
        let current = relationships_of(graph, rule, member);
        if current.len() == 1 && Some(current[0]) == target {
            continue;
        }
        for rel in current {
            if Some(rel) != target {
                prune(graph, rule, rel, &[member])?;
            }
        }
        pending.push(member);
    }

    match target {
        Some(rel) if pending.is_empty() => {
            log::trace!("{} already holds every member", rel);
            Ok(rel)
        }
        _ => attach(graph, rule, relating, &pending),
    }
}

/// Relate `members` to `relating` under a kind allowing many owners
pub(crate) fn assign_shared(
    graph: &mut EntityGraph,
    rule: &RelationshipRule,
    new_members: &[EntityId],
    relating: EntityId,
) -> Result<EntityId> {
    rule.validate()?;
    require_members(rule, new_members)?;
    attach(graph, rule, relating, new_members)
}

/// An assignment needs at least one member, otherwise it would leave a
/// relationship with nothing on its related side.
fn require_members(rule: &RelationshipRule, new_members: &[EntityId]) -> Result<()> {
    if new_members.is_empty() {
        return Err(GraphError::invalid_argument(
            rule.related_attribute,
            "at least one entity is required",
        ));
    }
    Ok(())
}

/// Remove `members` from every relationship of the kind, or only from the
/// ones owned by `relating` when given. Members without such a relationship
/// are skipped.
pub(crate) fn unassign(
    graph: &mut EntityGraph,
    rule: &RelationshipRule,
    removed: &[EntityId],
    relating: Option<EntityId>,
) -> Result<()> {
    // Group per relationship so each one is rewritten once
    let mut plan: Vec<(EntityId, Vec<EntityId>)> = Vec::new();
    for member in dedup(removed) {
        for rel in relationships_of(graph, rule, member) {
            if relating.is_some_and(|r| relating_of(graph, rule, rel) != Some(r)) {
                continue;
            }
            match plan.iter_mut().find(|(id, _)| *id == rel) {
                Some((_, list)) => list.push(member),
                None => plan.push((rel, vec![member])),
            }
        }
    }

    if plan.is_empty() {
        log::trace!("nothing to unassign for {:?}", rule.kind);
    }
    for (rel, list) in plan {
        prune(graph, rule, rel, &list)?;
    }
    Ok(())
}

/// Detach an entity from every relationship in the taxonomy.
///
/// Where it is a member it is pruned; relationships it owns are removed.
/// Afterwards only references from outside the taxonomy can remain.
pub(crate) fn detach(graph: &mut EntityGraph, id: EntityId) -> Result<()> {
    for kind in RelationshipKind::ALL {
        let rule = rule(graph, kind);
        for rel in relationships_of(graph, &rule, id) {
            prune(graph, &rule, rel, &[id])?;
        }
        if rule.is_self_relating() {
            continue;
        }
        for rel in relationships_for(graph, &rule, id) {
            remove_relationship(graph, rel)?;
        }
    }
    Ok(())
}

/// Check every id names an existing entity
pub(crate) fn require_all(graph: &EntityGraph, ids: &[EntityId]) -> Result<()> {
    for &id in ids {
        graph.get_or_err(id)?;
    }
    Ok(())
}

/// Check that [`detach`] would leave `id` unreferenced, so that removing it
/// afterwards cannot fail halfway.
pub(crate) fn check_detachable(graph: &EntityGraph, id: EntityId) -> Result<()> {
    graph.get_or_err(id)?;
    let rules: Vec<RelationshipRule> = RelationshipKind::ALL
        .into_iter()
        .map(|kind| rule(graph, kind))
        .collect();
    let blocking: Vec<EntityId> = graph
        .inverse_references(id)
        .into_iter()
        .filter(|referrer| {
            !rules.iter().any(|rule| {
                graph.is_a(*referrer, &rule.rel_type)
                    && (members(graph, rule, *referrer).contains(&id)
                        || relating_of(graph, rule, *referrer) == Some(id))
            })
        })
        .collect();
    if blocking.is_empty() {
        Ok(())
    } else {
        Err(GraphError::DanglingReferenceOnRemove {
            entity: id,
            referenced_by: blocking,
        })
    }
}

/// Detach an entity from all relationships, then remove it with its history
pub(crate) fn remove_object(graph: &mut EntityGraph, id: EntityId) -> Result<()> {
    check_detachable(graph, id)?;
    detach(graph, id)?;
    remove_with_history(graph, id)?;
    log::debug!("removed {}", id);
    Ok(())
}

/// Create a rooted entity with a fresh GlobalId and owner history
pub(crate) fn create_rooted(
    graph: &mut EntityGraph,
    ifc_type: IfcType,
    name: Option<&str>,
) -> Result<EntityId> {
    let history = if ifc_type.is_rooted() {
        owner::create_history(graph)?
    } else {
        None
    };
    let global_id = ifc_type.is_rooted().then(guid::new);
    graph.create_with(
        ifc_type,
        [
            ("GlobalId", global_id.map(AttributeValue::String).unwrap_or_default()),
            ("OwnerHistory", history.into()),
            ("Name", name.map(AttributeValue::from).unwrap_or_default()),
        ],
    )
}
