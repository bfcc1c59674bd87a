use crate::models::recipe::{Ingredient, Recipe, CUSTOM_RECIPE_NAME};

/// Parses the free-text custom recipe notation.
///
/// ```text
/// 2 Coal
/// 1 Iron ore
/// =1 Steel bar
/// ```
///
/// Every line is `<quantity> <item name>`. The line containing `=` is the
/// output (only the text after the first `=` is read); all other non-blank
/// lines are inputs. Counts that are not integers are kept as `None` rather
/// than rejected, and text without an output line yields an empty output
/// name, which never resolves to a price.
pub struct RecipeService;

impl RecipeService {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_custom(&self, text: &str) -> Recipe {
        let mut inputs = Vec::new();
        let mut output = None;

        for line in text.trim().lines() {
            if let Some((_, right)) = line.split_once('=') {
                output = Some(parse_line(right));
            } else if !line.trim().is_empty() {
                inputs.push(parse_line(line));
            }
        }

        Recipe::new(
            CUSTOM_RECIPE_NAME,
            inputs,
            output.unwrap_or_else(|| Ingredient::unquantified("")),
        )
    }

    /// Parse `text` and append it to `recipes`, returning the new entry.
    pub fn append_custom<'a>(&self, recipes: &'a mut Vec<Recipe>, text: &str) -> &'a Recipe {
        recipes.push(self.parse_custom(text));
        &recipes[recipes.len() - 1]
    }
}

impl Default for RecipeService {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_line(line: &str) -> Ingredient {
    let line = line.trim();
    let (count, name) = line.split_once(' ').unwrap_or((line, ""));
    Ingredient {
        item: name.trim().to_string(),
        quantity: leading_integer(count),
    }
}

/// Reads an optional sign and the leading run of digits, ignoring whatever
/// follows (`"2x"` is 2, `"1.5"` is 1). `None` when there are no digits.
fn leading_integer(text: &str) -> Option<i64> {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let sign_len = text.len() - unsigned.len();
    text[..sign_len + digits].parse::<i64>().ok()
}
