//! Keyword classifier and canned replies.
//!
//! Classification is a flat priority list over lower-cased substrings. The
//! first rule that matches wins, regardless of where or how often the
//! keywords appear.

use codemate_proto::category::Category;

/// Priority-ordered keyword rules. Anything unmatched is [`Category::Generic`].
const RULES: [(&[&str], Category); 4] = [
    (&["function", "code"], Category::Code),
    (&["debug", "error"], Category::Debug),
    (&["optimize", "performance"], Category::Optimize),
    (&["help", "how"], Category::Help),
];

/// Pick the reply category for a user message.
#[must_use]
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(Category::Generic, |(_, category)| *category)
}

/// The fixed reply text for a category.
#[must_use]
pub const fn reply(category: Category) -> &'static str {
    match category {
        Category::Code => CODE_REPLY,
        Category::Debug => DEBUG_REPLY,
        Category::Optimize => OPTIMIZE_REPLY,
        Category::Help => HELP_REPLY,
        Category::Generic => GENERIC_REPLY,
    }
}

/// Classify `text` and return both the category and its reply.
#[must_use]
pub fn respond(text: &str) -> (Category, &'static str) {
    let category = classify(text);
    (category, reply(category))
}

const CODE_REPLY: &str = "I'd be happy to help you with your code! Here are some ways I can assist:\n\
    \n\
    • **Code Review**: I can analyze your code for best practices and potential improvements\n\
    • **Optimization**: Suggest performance improvements and cleaner implementations  \n\
    • **Bug Detection**: Help identify and fix common programming issues\n\
    • **Documentation**: Generate comments and documentation for your code\n\
    \n\
    Feel free to paste your code snippet, and I'll provide specific feedback!";

const DEBUG_REPLY: &str = "Let's debug this together! \u{1f50d} Here's how I can help:\n\
    \n\
    • **Error Analysis**: Explain what error messages mean and how to fix them\n\
    • **Step-by-step Debugging**: Guide you through troubleshooting processes\n\
    • **Common Issues**: Identify patterns in bugs and their solutions\n\
    • **Testing Strategies**: Suggest ways to test and validate your fixes\n\
    \n\
    Share the error message or describe the unexpected behavior, and I'll help you track it down!";

const OPTIMIZE_REPLY: &str = "Great! Let's optimize your code for better performance \u{1f680}\n\
    \n\
    I can help with:\n\
    • **Algorithm Efficiency**: Suggest more efficient algorithms and data structures\n\
    • **Memory Usage**: Identify memory leaks and optimization opportunities\n\
    • **Code Readability**: Make code more maintainable and easier to understand\n\
    • **Performance Metrics**: Analyze time and space complexity\n\
    \n\
    Share your code, and I'll provide specific optimization recommendations!";

const HELP_REPLY: &str = "I'm here to help! \u{1f44b} Here are some things you can ask me:\n\
    \n\
    • \"**Review this function**\" - I'll analyze your code for improvements\n\
    • \"**How do I [specific task]**\" - Get step-by-step guidance\n\
    • \"**Explain this error**\" - Understand what went wrong and how to fix it\n\
    • \"**Optimize this code**\" - Get performance improvement suggestions\n\
    \n\
    You can also use the quick action buttons below for common tasks. What would you like to work on?";

const GENERIC_REPLY: &str = "I understand you'd like assistance with your development work. I'm designed to help with:\n\
    \n\
    • Code review and improvements\n\
    • Debugging and error resolution  \n\
    • Performance optimization\n\
    • Best practices and clean code\n\
    \n\
    Could you share more details about what you're working on or paste a code snippet? The more specific you are, the better I can help! \u{1f4a1}";
