use super::error::PromptError;
use crate::traits::{Output, UserInput};
use anyhow::Result;

/// Show a numbered list and read a 1-based index, re-asking on a bad index.
///
/// Returns the 0-based position of the chosen item.
pub fn select_index(
    input: &dyn UserInput,
    output: &dyn Output,
    title: &str,
    items: &[String],
    prompt: &str,
) -> Result<usize> {
    if items.is_empty() {
        return Err(PromptError::EmptyMenu(title.to_string()).into());
    }

    output.blank();
    output.info(title);
    for (index, item) in items.iter().enumerate() {
        output.list_item(index + 1, item);
    }

    loop {
        let answer = input.text(prompt, Some("1"))?;
        match answer.trim().parse::<usize>() {
            Ok(choice) if (1..=items.len()).contains(&choice) => {
                output.success(&format!("{} selected", items[choice - 1]));
                return Ok(choice - 1);
            }
            _ => output.error("Invalid index !!!"),
        }
    }
}

/// Menu over `(display, value)` pairs, returning the chosen value
pub fn select_value<'v>(
    input: &dyn UserInput,
    output: &dyn Output,
    title: &str,
    choices: &[(&str, &'v str)],
    prompt: &str,
) -> Result<&'v str> {
    let labels: Vec<String> = choices.iter().map(|(label, _)| label.to_string()).collect();
    let index = select_index(input, output, title, &labels, prompt)?;
    Ok(choices[index].1)
}
