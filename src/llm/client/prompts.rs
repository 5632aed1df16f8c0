//! Default LLM prompts.

/// Default prompt for abstractive summaries.
/// Placeholders: {content}, {min_length}, {max_length}.
pub const DEFAULT_SUMMARY_PROMPT: &str = r#"You are given an extract of the most important sentences from a longer text. Rewrite it as a fluent, self-contained summary in your own words.

Rules:
- Use only facts stated in the text. Do not add outside knowledge.
- Write between {min_length} and {max_length} tokens.
- Plain prose only. No headings, bullet points, or preamble.

Text:
{content}

Summary:"#;

/// Default prompt for keyword tags.
/// Placeholders: {content}, {max_keywords}.
pub const DEFAULT_TAGS_PROMPT: &str = r#"Read the text below and list the keywords that best describe what it is about.

Generate at most {max_keywords} short, lowercase keywords or key phrases:
- Main topics and subject matter
- Named technologies, organizations, people, or places that matter to the text
- Use hyphens instead of spaces inside a keyword (e.g., machine-learning)

Text:
{content}

Respond with ONLY a comma-separated list of keywords, most important first. No explanations."#;

/// Default prompt for span question answering.
/// Placeholders: {context}, {question}.
pub const DEFAULT_QA_PROMPT: &str = r#"Answer the question using a span copied exactly from the context.

Rules:
- The answer must be a contiguous piece of the context, copied verbatim.
- Choose the shortest span that fully answers the question.
- Always give your best span, even if the context does not clearly contain the answer.

Context:
{context}

Question: {question}

Respond with ONLY the answer span. No quotes, no explanation."#;
