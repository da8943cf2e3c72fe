use chat_types::GenerationPrompt;

/// System prompt - instructs the LLM how to behave
pub const SYSTEM_PROMPT: &str = r#"You are a friendly and helpful support assistant.

Guidelines:
- Answer the user's message directly and concisely
- When the Context section contains information, base your answer on it
- When the Context section is empty or unrelated, answer from general knowledge and say so if unsure
- Never invent policies, prices, dates or contact details
- Keep a polite, conversational tone"#;

const USER_LABEL: &str = "User message:";
const CONTEXT_LABEL: &str = "Context:";

/// Build the complete prompt sent to the LLM.
///
/// Inputs are used verbatim. The context section is present even when empty.
pub fn build_prompt(system: &str, message: &str, context: &str) -> GenerationPrompt {
    GenerationPrompt::new(format!(
        "{system}\n\n{USER_LABEL}\n{message}\n\n{CONTEXT_LABEL}\n{context}"
    ))
}

/// Text of the context section of an assembled prompt.
pub fn context_section(prompt: &str) -> Option<&str> {
    let marker = format!("\n\n{CONTEXT_LABEL}\n");
    prompt.rfind(&marker).map(|idx| &prompt[idx + marker.len()..])
}
