use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::collections::IndexSet;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::UnionType;

use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::hints::HintCode;
use crate::merger::join::join_type_applied_directives;
use crate::merger::join::join_union_member_applied_directive;
use crate::merger::merge_description;

impl Merger<'_> {
    /// A union's members are the union of the members subgraphs declare.
    pub(in crate::merger) fn merge_union(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<UnionType>>,
    ) -> ExtendedType {
        let mut directives = DirectiveList::default();
        for (idx, union_type) in sources {
            if union_type.is_some() {
                directives.extend(join_type_applied_directives(&self.graph_names[*idx], &[]));
            }
        }

        let members: IndexSet<&Name> = sources
            .values()
            .flatten()
            .flat_map(|union_type| union_type.members.iter().map(|member| &member.name))
            .collect();
        for member in &members {
            let member_sources: Sources<()> = sources
                .iter()
                .map(|(idx, union_type)| {
                    let has_member = union_type.is_some_and(|union_type| {
                        union_type.members.iter().any(|m| m.name == **member)
                    });
                    (*idx, has_member.then_some(()))
                })
                .collect();
            for (idx, has_member) in &member_sources {
                if has_member.is_some() {
                    directives.push(join_union_member_applied_directive(
                        &self.graph_names[*idx],
                        member,
                    ));
                }
            }
            self.error_reporter.report_mismatch_hint(
                HintCode::InconsistentUnionMember,
                &format!("{type_name}.{member}"),
                &format!(
                    "Union type \"{type_name}\" includes member type \"{member}\" in some but not all defining subgraphs: "
                ),
                "yes",
                &member_sources,
                |has_member| Some(if has_member.is_some() { "yes" } else { "no" }.to_string()),
                |_, subgraphs| format!("\"{member}\" is defined in {}", subgraphs.unwrap_or_default()),
                |_, subgraphs| format!(" but not in {subgraphs}"),
            );
        }

        ExtendedType::Union(Node::new(UnionType {
            description: merge_description(
                type_name,
                sources
                    .values()
                    .flatten()
                    .map(|union_type| union_type.description.as_ref()),
            ),
            name: type_name.clone(),
            directives,
            members: members
                .into_iter()
                .map(|member| ComponentName::from(member.clone()))
                .collect(),
        }))
    }
}
