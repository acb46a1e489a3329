//! Display and formatting functions for one-shot CLI output

use owo_colors::OwoColorize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style, Width},
    Table, Tabled,
};

use crate::formatting::{attempt_duration, format_bytes, format_task_progress, truncate_string};
use crate::models::{Application, ExecutorSummary, JobSummary, StageSummary};

/// Format application completion status with colored indicator
fn format_app_status(app: &Application) -> String {
    if app.is_completed() {
        format!("{} {}", "●".bright_blue(), "FINISHED".bright_blue())
    } else {
        format!("{} {}", "●".green(), "RUNNING".green())
    }
}

/// Format a Spark status string with coloring
fn format_status(status: &str) -> String {
    match status.to_uppercase().as_str() {
        "RUNNING" | "ACTIVE" => status.green().to_string(),
        "SUCCEEDED" | "COMPLETE" | "SUCCESS" | "COMPLETED" => status.bright_blue().to_string(),
        "FAILED" | "KILLED" | "ERROR" => status.bright_red().to_string(),
        "PENDING" => status.yellow().to_string(),
        "SKIPPED" => status.bright_black().to_string(),
        _ => status.white().to_string(),
    }
}

/// Table row for application display
#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Attempts")]
    attempts: String,

    #[tabled(rename = "User")]
    user: String,

    #[tabled(rename = "Started")]
    started: String,
}

/// Display applications in a table format
pub fn format_applications(apps: &[Application], name_max: usize) -> String {
    if apps.is_empty() {
        return "No applications found".yellow().to_string();
    }

    let rows: Vec<ApplicationRow> = apps
        .iter()
        .map(|app| ApplicationRow {
            id: app.id.clone(),
            name: truncate_string(&app.name, name_max),
            status: format_app_status(app),
            attempts: app.attempt_count().to_string(),
            user: app.spark_user().to_string(),
            started: app
                .start_time()
                .map(|t| t.display())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Table row for job display
#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "Job")]
    job_id: String,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Tasks")]
    tasks: String,

    #[tabled(rename = "Stages")]
    stages: String,

    #[tabled(rename = "Submitted")]
    submitted: String,
}

fn format_jobs(jobs: &[JobSummary]) -> String {
    if jobs.is_empty() {
        return "No jobs".yellow().to_string();
    }

    let rows: Vec<JobRow> = jobs
        .iter()
        .map(|job| JobRow {
            job_id: job.job_id.to_string(),
            name: truncate_string(&job.name, 40),
            status: format_status(&job.status),
            tasks: format_task_progress(job.num_completed_tasks, job.num_tasks),
            stages: job
                .stage_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
            submitted: job.submission_time.display(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Table row for stage display
#[derive(Tabled)]
struct StageRow {
    #[tabled(rename = "Stage")]
    stage_id: String,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Tasks")]
    tasks: String,

    #[tabled(rename = "Input")]
    input: String,

    #[tabled(rename = "Output")]
    output: String,

    #[tabled(rename = "Shuffle R/W")]
    shuffle: String,
}

fn format_stages(stages: &[StageSummary]) -> String {
    if stages.is_empty() {
        return "No stages".yellow().to_string();
    }

    let rows: Vec<StageRow> = stages
        .iter()
        .map(|stage| StageRow {
            stage_id: stage.stage_id.to_string(),
            name: truncate_string(&stage.name, 40),
            status: format_status(&stage.status),
            tasks: format_task_progress(stage.num_complete_tasks, stage.num_tasks),
            input: format_bytes(stage.input_bytes),
            output: format_bytes(stage.output_bytes),
            shuffle: format!(
                "{}/{}",
                format_bytes(stage.shuffle_read_bytes),
                format_bytes(stage.shuffle_write_bytes)
            ),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Table row for executor display
#[derive(Tabled)]
struct ExecutorRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Host:Port")]
    host_port: String,

    #[tabled(rename = "Active")]
    active: String,

    #[tabled(rename = "Cores")]
    cores: String,

    #[tabled(rename = "Tasks (A/F/C)")]
    tasks: String,

    #[tabled(rename = "Memory")]
    memory: String,

    #[tabled(rename = "Disk")]
    disk: String,
}

fn format_executors(executors: &[ExecutorSummary]) -> String {
    if executors.is_empty() {
        return "No executors".yellow().to_string();
    }

    let rows: Vec<ExecutorRow> = executors
        .iter()
        .map(|exec| ExecutorRow {
            id: exec.id.clone(),
            host_port: exec.host_port.clone(),
            active: if exec.is_active {
                "yes".green().to_string()
            } else {
                "no".bright_black().to_string()
            },
            cores: exec.total_cores.to_string(),
            tasks: format!(
                "{}/{}/{}",
                exec.active_tasks, exec.failed_tasks, exec.completed_tasks
            ),
            memory: format_bytes(exec.memory_used),
            disk: format_bytes(exec.disk_used),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Detailed view for a single application: header, attempts, jobs, stages
/// and executors in one block.
pub fn format_application_detail(
    app: &Application,
    jobs: Option<&[JobSummary]>,
    stages: Option<&[StageSummary]>,
    executors: Option<&[ExecutorSummary]>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {} ({})\n",
        "Application".bold(),
        app.id.bold(),
        app.name
    ));
    output.push_str(&format!(
        "Status: {}  User: {}  Attempts: {}\n",
        format_app_status(app),
        app.spark_user(),
        app.attempt_count()
    ));

    for attempt in &app.attempts {
        let id_display = attempt
            .attempt_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let duration = attempt_duration(&attempt.start_time, &attempt.end_time)
            .map(|d| format!(" [{}]", d))
            .unwrap_or_default();
        output.push_str(&format!(
            "  attempt {}: {} -> {}{}{}\n",
            id_display,
            attempt.start_time.display(),
            attempt.end_time.display(),
            duration,
            if attempt.completed { " (completed)" } else { "" }
        ));
    }

    if let Some(jobs) = jobs {
        output.push_str(&format!("\n{}\n", "Jobs".bold()));
        output.push_str(&format_jobs(jobs));
        output.push('\n');
    }

    if let Some(stages) = stages {
        output.push_str(&format!("\n{}\n", "Stages".bold()));
        output.push_str(&format_stages(stages));
        output.push('\n');
    }

    if let Some(executors) = executors {
        output.push_str(&format!("\n{}\n", "Executors".bold()));
        output.push_str(&format_executors(executors));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attempt;

    fn sample_app() -> Application {
        Application {
            id: "application_1234_0001".to_string(),
            name: "wordcount".to_string(),
            attempts: vec![Attempt {
                attempt_id: Some(1),
                start_time: crate::models::SparkTime::new("2024-03-01T10:00:00.000GMT"),
                end_time: crate::models::SparkTime::new("2024-03-01T10:05:00.000GMT"),
                completed: true,
                spark_user: "alice".to_string(),
            }],
        }
    }

    #[test]
    fn test_format_applications_empty() {
        let output = format_applications(&[], 40);
        assert!(output.contains("No applications found"));
    }

    #[test]
    fn test_format_applications_contains_id_and_user() {
        let output = format_applications(&[sample_app()], 40);
        assert!(output.contains("application_1234_0001"));
        assert!(output.contains("alice"));
    }

    #[test]
    fn test_format_application_detail_sections() {
        let app = sample_app();
        let output = format_application_detail(&app, Some(&[]), None, None);
        assert!(output.contains("application_1234_0001"));
        assert!(output.contains("Jobs"));
        assert!(!output.contains("Stages"));
    }
}
