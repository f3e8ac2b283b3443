use std::collections::HashMap;

use fun_ast::TypeP;
use fun_type::{PrimitiveType, Type, TypeStore};

/// Converts a written type annotation into a [Type].
///
/// Each distinct type variable name (e.g. `'a`) is mapped to one fresh variable, recorded in
/// `variables`, so that every mention of `'a` within one declaration denotes the same type.
/// Names that are not primitive types are kept as constructor names.
pub(crate) fn lower_annotation(
    ty: &TypeP,
    store: &mut TypeStore,
    variables: &mut HashMap<String, Type>,
) -> Type {
    match ty {
        TypeP::Named { name, args } => {
            if args.is_empty() {
                if let Some(primitive) = PrimitiveType::from_name(&name.name) {
                    return primitive.into();
                }
            }
            Type::Constructor {
                name: name.name.clone(),
                args: args
                    .iter()
                    .map(|arg| lower_annotation(arg, store, variables))
                    .collect(),
            }
        }
        TypeP::Variable(name) => variables
            .entry(name.name.clone())
            .or_insert_with(|| store.fresh_variable())
            .clone(),
        TypeP::Function(argument, result) => Type::arrow(
            lower_annotation(argument, store, variables),
            lower_annotation(result, store, variables),
        ),
        TypeP::Tuple(elements) => Type::tuple(
            elements
                .iter()
                .map(|element| lower_annotation(element, store, variables))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fun_ast::builder::{ty_arrow, ty_named, ty_tuple, ty_var};

    #[test]
    fn primitives_and_constructors() {
        let mut store = TypeStore::new();
        let mut variables = HashMap::new();
        let list = ty_named("list", vec![ty_named("int", vec![])]);
        let lowered = lower_annotation(&list, &mut store, &mut variables);
        assert_eq!(lowered.to_string(), "int list");
        assert!(store.is_empty());
    }

    #[test]
    fn named_variables_are_shared() {
        let mut store = TypeStore::new();
        let mut variables = HashMap::new();
        let ty = ty_arrow(
            ty_var("'x"),
            ty_tuple(vec![ty_var("'x"), ty_var("'y")]),
        );
        let lowered = lower_annotation(&ty, &mut store, &mut variables);
        assert_eq!(lowered.to_string(), "'a -> 'a * 'b");
        assert_eq!(store.len(), 2);

        // Later annotations in the same declaration reuse the same variables.
        let again = lower_annotation(&ty_var("'y"), &mut store, &mut variables);
        assert_eq!(again.to_string(), "'b");
    }
}
