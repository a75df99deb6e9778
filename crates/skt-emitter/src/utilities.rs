//! String-level helpers shared by the type rewriter and the emitters.

/// Splits `type_list` at top-level occurrences of any separator, never
/// inside angle brackets, parentheses, or square brackets. Components are
/// trimmed.
pub fn split_type_list(type_list: &str, separators: &[&str]) -> Vec<String> {
    let characters: Vec<char> = type_list.chars().collect();
    let mut result = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0i32;
    let mut index = 0;

    'characters: while index < characters.len() {
        if bracket_depth == 0 {
            for separator in separators {
                let separator_characters: Vec<char> = separator.chars().collect();
                if characters[index..].starts_with(&separator_characters) {
                    result.push(current.trim().to_string());
                    current.clear();
                    index += separator_characters.len();
                    continue 'characters;
                }
            }
        }

        let character = characters[index];
        match character {
            '<' | '(' | '[' => bracket_depth += 1,
            '>' | ')' | ']' => bracket_depth -= 1,
            _ => {}
        }
        current.push(character);
        index += 1;
    }

    result.push(current.trim().to_string());
    result
}

/// True when the whole string is wrapped in a single pair of parentheses.
pub fn is_in_enveloping_parentheses(type_name: &str) -> bool {
    if !type_name.starts_with('(') || !type_name.ends_with(')') {
        return false;
    }
    let mut depth = 0i32;
    for (index, character) in type_name.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return index == type_name.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

/// `red` → `Red`, `rgbColor` → `RgbColor`.
pub fn capitalized_as_camel_case(identifier: &str) -> String {
    let mut characters = identifier.chars();
    match characters.next() {
        Some(first) => first.to_uppercase().collect::<String>() + characters.as_str(),
        None => String::new(),
    }
}

/// `north` → `NORTH`, `northWest` → `NORTH_WEST`, `jsonURLPath` →
/// `JSON_URL_PATH`.
pub fn upper_snake_case(identifier: &str) -> String {
    let characters: Vec<char> = identifier.chars().collect();
    let mut result = String::with_capacity(identifier.len() + 4);

    for (index, &character) in characters.iter().enumerate() {
        if character.is_uppercase() && index > 0 {
            let previous = characters[index - 1];
            let starts_word = previous.is_lowercase() || previous.is_ascii_digit();
            // A capital followed by a lowercase letter ends an acronym run.
            let ends_acronym = previous.is_uppercase()
                && characters.get(index + 1).is_some_and(|next| next.is_lowercase());
            if starts_word || ends_acronym {
                result.push('_');
            }
        }
        result.extend(character.to_uppercase());
    }

    result
}

/// Decodes the backslash escapes the front-end leaves in literal code
/// strings.
pub fn interpret_escapes(string: &str) -> String {
    let mut result = String::with_capacity(string.len());
    let mut characters = string.chars();

    while let Some(character) = characters.next() {
        if character != '\\' {
            result.push(character);
            continue;
        }
        match characters.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Direct source-to-target type name substitutions, consulted after all
/// structural rewriting rules have failed to match.
pub fn get_type_mapping(type_name: &str) -> Option<&'static str> {
    let mapped = match type_name {
        "Error" => "Exception",
        "UInt8" => "UByte",
        "UInt16" => "UShort",
        "UInt32" => "UInt",
        "UInt64" => "ULong",
        "Int8" => "Byte",
        "Int16" => "Short",
        "Int32" => "Int",
        "Int64" => "Long",
        "Float32" => "Float",
        "Float64" => "Double",
        "Character" => "Char",
        "String.Index" => "Int",
        "Substring.Index" => "Int",
        "Substring" => "String",
        "String.SubSequence" => "String",
        "Substring.SubSequence" => "String",
        "Substring.Element" => "Char",
        "String.Element" => "Char",
        "Range<String.Index>" => "IntRange",
        "Array<Element>.Index" => "Int",
        _ => return None,
    };
    Some(mapped)
}
