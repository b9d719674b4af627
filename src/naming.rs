//! Naming helpers
//!
//! Derives Java type, property and accessor names from the local names
//! carried by a mapping (`_priceInfo`, `_flightdate`, ...).

/// Convert snake_case or camelCase to PascalCase
///
/// Only the first letter of each `_`-separated word is changed; the rest
/// of the word is kept as written.
///
/// # Examples
/// ```
/// use bapigen::naming::to_pascal_case;
/// assert_eq!(to_pascal_case("price_info"), "PriceInfo");
/// assert_eq!(to_pascal_case("priceInfo"), "PriceInfo");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert to camelCase, see [`to_pascal_case`] for the word rules
///
/// # Examples
/// ```
/// use bapigen::naming::to_camel_case;
/// assert_eq!(to_camel_case("price_info"), "priceInfo");
/// ```
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip the configured local-name prefix, if present
pub fn strip_local_prefix<'a>(local_name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return local_name;
    }
    local_name.strip_prefix(prefix).unwrap_or(local_name)
}

/// Type name of the declaration describing a structure's shape
///
/// # Examples
/// ```
/// use bapigen::naming::type_name_for;
/// assert_eq!(type_name_for("_priceInfo", "_"), "PriceInfo");
/// assert_eq!(type_name_for("_extension_out", "_"), "ExtensionOut");
/// ```
pub fn type_name_for(local_name: &str, prefix: &str) -> String {
    to_pascal_case(strip_local_prefix(local_name, prefix))
}

/// Getter name for a field (`_flightdate` -> `getFlightdate`)
pub fn getter_name(local_name: &str, prefix: &str) -> String {
    format!("get{}", type_name_for(local_name, prefix))
}

/// Setter name for a field (`_flightdate` -> `setFlightdate`)
pub fn setter_name(local_name: &str, prefix: &str) -> String {
    format!("set{}", type_name_for(local_name, prefix))
}

/// Parameter name used in setters (`_priceInfo` -> `priceInfo`)
pub fn property_name(local_name: &str, prefix: &str) -> String {
    let name = to_camel_case(strip_local_prefix(local_name, prefix));
    if is_java_reserved(&name) {
        format!("{name}Value")
    } else {
        name
    }
}

/// Check that `s` is a legal Java identifier
pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') && !is_java_reserved(s)
}

/// Check that every `.`-separated segment of a package is a Java identifier
///
/// Case is not enforced, `myPackage` is accepted.
pub fn is_java_package(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_java_identifier)
}

pub(crate) fn is_java_reserved(word: &str) -> bool {
    matches!(
        word,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "true"
            | "false"
            | "null"
    )
}
