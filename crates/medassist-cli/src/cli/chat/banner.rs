//! Static screens for the chat session: welcome banner, empty-state hint,
//! medical disclaimer and the about page.

use console::style;

use super::renderer::ChatRenderer;

const DISCLAIMER: &str = "This tool is for informational purposes only and is not a substitute \
for professional medical advice, diagnosis, or treatment. Always seek the advice of your \
physician or other qualified health provider.";

/// Shown by `/about`. Rendered as Markdown.
pub const ABOUT_MARKDOWN: &str = "\
# About MedAssist AI

An intelligent symptom analysis assistant. Describe the symptoms you are \
experiencing and MedAssist looks up possible conditions and treatments in a \
medical knowledge base, then summarises what it found.

## How it works

1. **Describe your symptoms** in natural language. Be as detailed as possible.
2. **Knowledge search**: your n8n workflow searches a medical knowledge base \
for the most relevant information.
3. **Answer**: an AI model lists potential conditions and available treatment \
information.

## Guidelines for use

- Be specific and detailed when describing your symptoms
- Include how long you have had them and how severe they are
- Mention any relevant medical history
- Use the answer as a starting point for a conversation with a healthcare professional
- Don't use this tool for emergency medical situations

## Important medical disclaimer

This tool is **not** a replacement for professional medical care. It cannot \
diagnose medical conditions or prescribe treatments. Always consult qualified \
healthcare professionals for diagnosis, treatment recommendations, prescription \
medications and emergencies.

If you are experiencing a medical emergency, call your local emergency services \
immediately (911 in the US, 999 in the UK, 112 in the EU).

## Privacy

Messages are sent only to the n8n webhook you configured, together with a \
random session id. Nothing is stored on disk except the webhook URL.
";

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(
    assistant_name: &str,
    endpoint: Option<&str>,
    session_id: &str,
    show_disclaimer: bool,
) {
    println!();
    println!("  {}", style(format!("Welcome to {assistant_name} AI")).cyan().bold());
    println!(
        "  {}",
        style("Describe your symptoms and I'll help identify potential conditions and treatments.")
            .dim()
    );
    println!();

    let connection = match endpoint {
        Some(_) => style("Connected").green().to_string(),
        None => style("Not configured").yellow().to_string(),
    };
    println!("  {}  {}", style("Webhook:").bold(), connection);
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );

    if show_disclaimer {
        print_disclaimer();
    }

    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
}

pub fn print_disclaimer() {
    println!();
    println!(
        "  {} {}",
        style("Disclaimer:").yellow().bold(),
        style(DISCLAIMER).dim()
    );
}

/// Hint printed while the conversation is empty.
pub fn print_empty_hint() {
    println!();
    println!("  {}", style("Start by describing your symptoms").bold());
    println!(
        "  {}",
        style("For example: \"I have a fever, cough, and chest pains\"").dim()
    );
    println!();
}

pub fn print_about(renderer: &ChatRenderer) {
    renderer.print_markdown(ABOUT_MARKDOWN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_covers_emergencies_and_privacy() {
        assert!(ABOUT_MARKDOWN.contains("emergency services"));
        assert!(ABOUT_MARKDOWN.contains("## Privacy"));
    }

    #[test]
    fn test_disclaimer_text() {
        assert!(DISCLAIMER.starts_with("This tool is for informational purposes only"));
        assert!(DISCLAIMER.ends_with("qualified health provider."));
    }
}
