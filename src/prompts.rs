pub const RECOMMENDATION: &str = include_str!("../data/prompts/recommendation.txt");

const NO_PROJECTS_PLACEHOLDER: &str = "(No existing projects provided by the user)";

/// Replace `{{key}}` placeholders in a template string.
///
/// The template is scanned once; substituted values are copied verbatim and
/// never scanned for placeholders themselves. Unknown keys are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let value = after.find("}}").and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });

        match value {
            Some((value, end)) => {
                result.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                result.push_str("{{");
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Build the recommendation instruction for the text model.
///
/// Existing projects are listed one per line as `- name`; an empty list is
/// replaced by an explicit placeholder so the model knows to propose only new
/// ideas.
pub fn recommendation_instruction(interests: &str, project_list: &[String]) -> String {
    let projects = if project_list.is_empty() {
        NO_PROJECTS_PLACEHOLDER.to_string()
    } else {
        project_list
            .iter()
            .map(|name| format!("- {}", name))
            .collect::<Vec<_>>()
            .join("\n")
    };

    render(
        RECOMMENDATION,
        &[("interests", interests), ("projects", &projects)],
    )
}
