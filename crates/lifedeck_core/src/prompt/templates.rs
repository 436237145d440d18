//! Template scaffolds for subcategories.
//!
//! Scaffolds are filled with the lower-cased category and subcategory names.
//! Output is fully determined by the two inputs.

use crate::model::category::PromptTemplates;

/// Synthesis template shared by the default taxonomy.
pub const UNIVERSAL_SYNTHESIS_PROMPT: &str = "Let's wrap up this conversation. Please provide a clear synthesis:

{{CONTEXT}}

**Key Insights**
- The most important things we discussed or I learned

**Decisions Made**
- Any conclusions or choices I've landed on

**Action Items**
- Specific next steps (be concrete)

**Open Questions**
- Anything unresolved to revisit later

Keep it concise and actionable. I'll save this for future reference.";

/// Builds evaluation, planning and synthesis templates for a subcategory.
pub fn generate_prompts_for_subcategory(
    category_name: &str,
    subcategory_name: &str,
) -> PromptTemplates {
    let category = category_name.to_lowercase();
    let subcategory = subcategory_name.to_lowercase();
    let combined = format!("{category} - {subcategory}");

    PromptTemplates {
        evaluation: evaluation_template(&category, &subcategory, &combined),
        planning: planning_template(&category, &subcategory, &combined),
        synthesis: synthesis_template(&combined),
    }
}

fn evaluation_template(category: &str, subcategory: &str, combined: &str) -> String {
    format!(
        "I want you to help me evaluate my {combined}.

{{{{CONTEXT}}}}

To give you an accurate assessment, please start by asking me about:
1. What aspects of {subcategory} are most important to me in my {category}
2. My current situation with {subcategory}
3. What's working well and what isn't
4. Any challenges or pain points I'm experiencing
5. My goals or desired outcomes for {subcategory}
6. What success looks like to me in this area

Once you understand my situation, please analyze:
- How things are going overall
- Patterns or themes you notice
- Strengths I can build on
- Areas that need attention or improvement
- Any risks or concerns you see

Please ask clarifying questions before assessing."
    )
}

fn planning_template(category: &str, subcategory: &str, combined: &str) -> String {
    format!(
        "I want you to help me create a plan for my {combined}.

{{{{CONTEXT}}}}

To create an effective plan, please start by asking me about:
1. What I want to achieve with {subcategory} in my {category}
2. My current starting point
3. My available time, resources, and constraints
4. What's worked or hasn't worked for me before
5. My priorities and what matters most
6. Any deadlines or timeframes I'm working with
7. What obstacles or challenges I anticipate

Once you understand my situation, please help me design a plan that:
- Moves me toward my goals
- Is realistic and achievable given my constraints
- Builds on my strengths
- Addresses key challenges
- Includes clear next steps

Please ask clarifying questions before creating the plan."
    )
}

fn synthesis_template(combined: &str) -> String {
    format!(
        "Based on our conversation about {combined}, please provide a comprehensive synthesis that includes:

{{{{CONTEXT}}}}

1. **Key Insights**: The most important things we discussed
2. **Main Themes**: Recurring patterns or central ideas
3. **Action Items**: Concrete next steps or recommendations
4. **Progress**: How things have evolved (if we've discussed this before)
5. **Focus Areas**: What deserves attention going forward

Please structure this in a clear, organized way that I can reference later."
    )
}

#[cfg(test)]
mod tests {
    use super::{generate_prompts_for_subcategory, UNIVERSAL_SYNTHESIS_PROMPT};
    use crate::model::category::PromptKind;
    use crate::prompt::generator::CONTEXT_PLACEHOLDER;

    #[test]
    fn every_template_has_one_placeholder() {
        let templates = generate_prompts_for_subcategory("Health", "Sleep");
        for kind in PromptKind::ALL {
            assert_eq!(templates.get(kind).matches(CONTEXT_PLACEHOLDER).count(), 1);
        }
        assert_eq!(UNIVERSAL_SYNTHESIS_PROMPT.matches(CONTEXT_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn names_are_lower_cased() {
        let templates = generate_prompts_for_subcategory("Personal Growth", "Reading");
        assert!(templates
            .evaluation
            .starts_with("I want you to help me evaluate my personal growth - reading."));
        assert!(templates
            .planning
            .contains("1. What I want to achieve with reading in my personal growth"));
        assert!(!templates.synthesis.contains("Reading"));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(
            generate_prompts_for_subcategory("Finance", "Debt"),
            generate_prompts_for_subcategory("Finance", "Debt")
        );
    }
}
