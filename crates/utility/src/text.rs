/// Turns a camelCase flag name into a human readable label:
/// `"acceptsCreditCards"` becomes `"Accepts Credit Cards"`.
pub fn camel_to_title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 4);
    for (i, c) in text.chars().enumerate() {
        if i == 0 {
            result.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            result.push(' ');
            result.push(c);
        } else {
            result.push(c);
        }
    }
    result
}
