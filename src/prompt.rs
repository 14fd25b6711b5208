use crate::models::UploadedFile;

pub const SYSTEM_PROMPT: &str = "You are a helpful data analyst.";

/// Assembles the single user prompt: persona preamble, the task verbatim,
/// one section per auxiliary file, then the plot and JSON-only instructions.
pub fn build_prompt(task: &str, files: &[UploadedFile]) -> String {
    let mut prompt = format!("You are a helpful Data Analyst Agent.\n\nTask:\n{}\n", task);

    if !files.is_empty() {
        prompt.push_str("\nSupporting files:\n");
        for file in files {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", file.name, file.content));
        }
    }

    prompt.push_str(
        "\nIf the task requires a plot, include it as a base64 encoded data URI string \
         like \"data:image/png;base64,...\".\n\
         \nRespond only in JSON format (array or object as appropriate).\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn task_text_appears_verbatim() {
        let task = "Plot sales by region.\nUse the attached CSV.";
        let prompt = build_prompt(task, &[]);
        assert!(prompt.contains(task));
    }

    #[test]
    fn no_files_means_no_supporting_section() {
        let prompt = build_prompt("count rows", &[]);
        assert!(!prompt.contains("Supporting files"));
    }

    #[test]
    fn file_names_and_contents_are_embedded() {
        let files = vec![
            file("sales.csv", "region,total\nnorth,10"),
            file("notes.txt", "exclude Q4"),
        ];
        let prompt = build_prompt("summarize", &files);
        assert!(prompt.contains("--- sales.csv ---"));
        assert!(prompt.contains("region,total\nnorth,10"));
        assert!(prompt.contains("--- notes.txt ---"));
        assert!(prompt.contains("exclude Q4"));
    }

    #[test]
    fn instructions_are_always_present() {
        let prompt = build_prompt("anything", &[]);
        assert!(prompt.contains("data:image/png;base64,"));
        assert!(prompt.contains("Respond only in JSON format"));
    }
}
