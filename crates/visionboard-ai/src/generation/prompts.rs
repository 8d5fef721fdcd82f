//! Prompt templates, completion post-processing, and mock completions.
//!
//! The templates and the marker-based extraction rules are a wire-level
//! contract carried over from the product's original service: the expansion
//! prompt ends in a `Goal: {goal}` terminator so the generated portion can be
//! recovered after the last echo of it, and the rephrase prompt ends in
//! `Motivational version:` for the same reason.

/// Few-shot expansion prompt ending in the `Goal: {goal}` terminator.
pub(crate) fn expansion_prompt(goal: &str) -> String {
    format!(
        "Expand the goal '{goal}' into exactly 5 smart, specific, and motivational steps.\n\
         Each step must start with 'Step X:' and focus on preparation, action, and results.\n\
         Make it sound clear, inspiring, and practical.\n\
         Example:\n\
         Goal: Learn Python\n\
         Step 1: Research beginner-friendly Python courses that align with your interests.\n\
         Step 2: Install Python and set up a simple coding environment on your laptop.\n\
         Step 3: Dedicate 30 minutes daily to small hands-on coding exercises.\n\
         Step 4: Build a mini project (e.g., a to-do list app) to apply what you've learned.\n\
         Step 5: Share your project on GitHub or a community to get feedback and stay motivated.\n\
         \n\
         Goal: {goal}\n"
    )
}

/// Rephrase prompt ending in the `Motivational version:` marker.
pub(crate) fn rephrase_prompt(goal: &str) -> String {
    format!(
        "Rewrite the following goal in an inspiring, motivational tone:\n{goal}\nMotivational version:"
    )
}

/// Recovers the plan from a completion: take what follows the last
/// `Goal: {goal}` echo, cut at the next `Goal:` if the model drifted into a
/// fresh goal, trim.
pub(crate) fn extract_plan(completion: &str, goal: &str) -> String {
    let marker = format!("Goal: {goal}");

    let after_echo = completion
        .rsplit(marker.as_str())
        .next()
        .unwrap_or(completion);
    let plan = after_echo.split("Goal:").next().unwrap_or(after_echo);

    plan.trim().to_string()
}

/// Recovers the rephrased goal: everything after the last
/// `Motivational version:` marker, trimmed.
pub(crate) fn extract_rephrased(completion: &str) -> String {
    completion
        .rsplit("Motivational version:")
        .next()
        .unwrap_or(completion)
        .trim()
        .to_string()
}

/// Fabricated expansion completion, shaped like a base LM's output: prompt
/// echo, five steps, then a drift into a fresh goal so the marker-stripping
/// paths run against it.
pub(crate) fn mock_expansion_completion(prompt: &str, goal: &str) -> String {
    format!(
        "{prompt}Step 1: Write down why '{goal}' matters to you and what success looks like.\n\
         Step 2: Break it into small weekly milestones with clear outcomes.\n\
         Step 3: Reserve a fixed daily time slot for it and protect that time.\n\
         Step 4: Track progress at the end of every week and note what worked.\n\
         Step 5: Review the plan monthly and adjust the next milestone.\n\
         Goal: Run a marathon\n"
    )
}

/// Fabricated rephrase completion: prompt echo plus a deterministic
/// motivational line.
pub(crate) fn mock_rephrase_completion(prompt: &str, goal: &str) -> String {
    format!("{prompt} Every day you show up for it, '{goal}' moves from a wish to a win!")
}
