mod hints;
mod options;
mod ordering;

pub(crate) mod test_helpers {
    use apollo_compiler::Schema;
    use apollo_compiler::schema::ExtendedType;
    use apollo_compiler::schema::ObjectType;
    use federation_merge::CompositionOptions;
    use federation_merge::MergeResult;
    use federation_merge::Subgraph;
    use federation_merge::Subgraphs;
    use federation_merge::merge_subgraphs_with_options;

    pub(crate) struct ServiceDefinition<'a> {
        pub(crate) name: &'a str,
        pub(crate) type_defs: &'a str,
    }

    /// Registers the services in order, panicking on invalid SDL.
    pub(crate) fn subgraphs(service_list: &[ServiceDefinition<'_>]) -> Subgraphs {
        let mut subgraphs = Subgraphs::new();
        for service in service_list {
            let subgraph = Subgraph::parse(
                service.name,
                &format!("http://{}", service.name),
                service.type_defs,
            )
            .unwrap();
            subgraphs.add(subgraph).unwrap();
        }
        subgraphs
    }

    pub(crate) fn merge(service_list: &[ServiceDefinition<'_>]) -> MergeResult {
        merge_with_options(service_list, CompositionOptions::default())
    }

    pub(crate) fn merge_with_options(
        service_list: &[ServiceDefinition<'_>],
        options: CompositionOptions,
    ) -> MergeResult {
        merge_subgraphs_with_options(&subgraphs(service_list), options)
    }

    pub(crate) fn hint_messages(result: &MergeResult) -> Vec<String> {
        result.hints.iter().map(|hint| hint.message.clone()).collect()
    }

    pub(crate) fn error_messages(result: &MergeResult) -> Vec<String> {
        result.errors.iter().map(|error| error.message()).collect()
    }

    /// The supergraph of a merge expected to succeed.
    pub(crate) fn supergraph(result: &MergeResult) -> &Schema {
        assert!(
            result.errors.is_empty(),
            "unexpected errors: {:?}",
            result.errors
        );
        result.supergraph.as_ref().unwrap()
    }

    pub(crate) fn object<'a>(schema: &'a Schema, name: &str) -> &'a ObjectType {
        match schema.types.get(name) {
            Some(ExtendedType::Object(object)) => object,
            other => panic!("expected object type {name}, found {other:?}"),
        }
    }

    /// `graph` argument of every application of `directive_name` in `directives`, in order.
    pub(crate) fn graphs<'a>(
        directives: impl IntoIterator<Item = &'a apollo_compiler::ast::Directive>,
        directive_name: &str,
    ) -> Vec<String> {
        directives
            .into_iter()
            .filter(|directive| directive.name.as_str() == directive_name)
            .filter_map(|directive| directive.specified_argument_by_name("graph"))
            .map(|graph| graph.to_string())
            .collect()
    }
}

pub(crate) use test_helpers::ServiceDefinition;
pub(crate) use test_helpers::error_messages;
pub(crate) use test_helpers::graphs;
pub(crate) use test_helpers::hint_messages;
pub(crate) use test_helpers::merge;
pub(crate) use test_helpers::merge_with_options;
pub(crate) use test_helpers::object;
pub(crate) use test_helpers::subgraphs;
pub(crate) use test_helpers::supergraph;
