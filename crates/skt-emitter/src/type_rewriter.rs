//! Rewrites source-language type strings into their Kotlin form.
//!
//! Optionals, array/dictionary sugar, tuples, and function types are handled
//! structurally; everything else falls through to the name-mapping table.
//! The rules are order-significant, so a trailing `?` is peeled before any
//! bracket sugar is considered.

use crate::utilities::{get_type_mapping, is_in_enveloping_parentheses, split_type_list};

pub fn rewrite_type(type_name: &str) -> String {
    let type_name = type_name.replace("()", "Unit");

    if let Some(wrapped) = type_name.strip_suffix('?') {
        return format!("{}?", rewrite_type(wrapped));
    }

    if let Some(inner) = type_name
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let key_value = split_type_list(inner, &[":"]);
        if key_value.len() == 2 {
            return format!(
                "MutableMap<{}, {}>",
                rewrite_type(&key_value[0]),
                rewrite_type(&key_value[1])
            );
        }
        return format!("MutableList<{}>", rewrite_type(inner));
    }

    if let Some(inner) = type_name
        .strip_prefix("ArrayClass<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return format!("MutableList<{}>", rewrite_type(inner));
    }

    if let Some(inner) = type_name
        .strip_prefix("DictionaryClass<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        let key_value = split_type_list(inner, &[", "]);
        if key_value.len() == 2 {
            return format!(
                "MutableMap<{}, {}>",
                rewrite_type(&key_value[0]),
                rewrite_type(&key_value[1])
            );
        }
    }

    if is_in_enveloping_parentheses(&type_name) {
        let inner = &type_name[1..type_name.len() - 1];
        let components = split_type_list(inner, &[", "]);
        if components.len() == 2 {
            return format!(
                "Pair<{}, {}>",
                rewrite_type(&components[0]),
                rewrite_type(&components[1])
            );
        }
        return rewrite_type(inner);
    }

    let function_components = split_type_list(&type_name, &[" -> "]);
    if function_components.len() > 1 {
        let last_index = function_components.len() - 1;
        let mut rewritten = Vec::with_capacity(function_components.len());
        for (index, component) in function_components.iter().enumerate() {
            if index < last_index && is_in_enveloping_parentheses(component) {
                let inner = &component[1..component.len() - 1];
                let parameters: Vec<String> = split_type_list(inner, &[", "])
                    .iter()
                    .map(|parameter| rewrite_type(parameter))
                    .collect();
                rewritten.push(format!("({})", parameters.join(", ")));
            } else {
                rewritten.push(rewrite_type(component));
            }
        }
        return rewritten.join(" -> ");
    }

    match get_type_mapping(&type_name) {
        Some(mapped) => mapped.to_string(),
        None => type_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        assert_eq!(rewrite_type("()"), "Unit");
    }

    #[test]
    fn test_optionals() {
        assert_eq!(rewrite_type("Int?"), "Int?");
        assert_eq!(rewrite_type("[Int]?"), "MutableList<Int>?");
        assert_eq!(rewrite_type("Int??"), "Int??");
    }

    #[test]
    fn test_array_sugar() {
        assert_eq!(rewrite_type("[Int]"), "MutableList<Int>");
        assert_eq!(rewrite_type("[[Int]]"), "MutableList<MutableList<Int>>");
    }

    #[test]
    fn test_dictionary_sugar() {
        assert_eq!(rewrite_type("[String: Int]"), "MutableMap<String, Int>");
        assert_eq!(
            rewrite_type("[Int: [String: Int64]]"),
            "MutableMap<Int, MutableMap<String, Long>>"
        );
    }

    #[test]
    fn test_array_and_dictionary_classes() {
        assert_eq!(rewrite_type("ArrayClass<Int>"), "MutableList<Int>");
        assert_eq!(
            rewrite_type("DictionaryClass<String, Int>"),
            "MutableMap<String, Int>"
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(rewrite_type("(Int, String)"), "Pair<Int, String>");
        assert_eq!(rewrite_type("(Int)"), "Int");
        assert_eq!(rewrite_type("([Int], Int64)"), "Pair<MutableList<Int>, Long>");
    }

    #[test]
    fn test_function_types() {
        assert_eq!(rewrite_type("(Int) -> String"), "(Int) -> String");
        assert_eq!(rewrite_type("(Int, Int) -> Bool"), "(Int, Int) -> Bool");
        assert_eq!(rewrite_type("(Int) -> ()"), "(Int) -> Unit");
        assert_eq!(
            rewrite_type("(Int) -> (Int) -> String"),
            "(Int) -> (Int) -> String"
        );
    }

    #[test]
    fn test_name_mapping() {
        assert_eq!(rewrite_type("Int64"), "Long");
        assert_eq!(rewrite_type("Character"), "Char");
        assert_eq!(rewrite_type("MyType"), "MyType");
    }

    #[test]
    fn test_idempotence_on_rewritten_types() {
        for type_name in [
            "Unit",
            "Int?",
            "MutableList<Int>",
            "MutableMap<String, Int>",
            "Pair<Int, String>",
            "(Int) -> String",
            "(Int, Int) -> Bool",
        ] {
            assert_eq!(
                rewrite_type(&rewrite_type(type_name)),
                rewrite_type(type_name),
                "rewriting {type_name} twice should be stable"
            );
        }
    }
}
