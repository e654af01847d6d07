//! Job board commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand, ValueEnum};
use futures_util::StreamExt;

use alumni_core::list::Selector;
use alumni_core::model::{ApplicationForm, ApplicationStatus, Attachment, Job, JobType, NewJob};
use alumni_core::{Fetcher, Session};
use alumni_rest::PageStream;

use super::list::{self, ListArgs};
use super::{Source, parse_id};
use crate::config::Settings;
use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct JobsCommand {
    #[command(subcommand)]
    pub command: JobsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum JobsSubcommand {
    /// List jobs and internships
    List(ListJobsArgs),

    /// Show one posting
    Show(ShowJobArgs),

    /// Post a job or internship
    Post(PostJobArgs),

    /// Apply to a posting
    Apply(ApplyArgs),

    /// Move an application to a new review state (job poster only)
    Status(StatusArgs),

    /// Print every posting as JSON lines
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Kind {
    Job,
    Internship,
}

impl From<Kind> for JobType {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Job => JobType::Job,
            Kind::Internship => JobType::Internship,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListJobsArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Only jobs or only internships
    #[arg(long = "type")]
    pub kind: Option<Kind>,
}

#[derive(Args, Debug)]
pub struct ShowJobArgs {
    /// Job id
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PostJobArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub company: String,

    #[arg(long = "type", value_enum, default_value = "job")]
    pub kind: Kind,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Last day to apply (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Job id
    pub id: String,

    #[arg(long)]
    pub cover_letter: Option<String>,

    /// Resume file to attach
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Status {
    Applied,
    Shortlisted,
    Rejected,
    Hired,
}

impl From<Status> for ApplicationStatus {
    fn from(s: Status) -> Self {
        match s {
            Status::Applied => ApplicationStatus::Applied,
            Status::Shortlisted => ApplicationStatus::Shortlisted,
            Status::Rejected => ApplicationStatus::Rejected,
            Status::Hired => ApplicationStatus::Hired,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Job id
    pub job: String,

    /// Application id
    pub application: String,

    #[arg(value_enum)]
    pub status: Status,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Only postings of the signed-in member
    #[arg(long)]
    pub mine: bool,
}

pub async fn handle(cmd: JobsCommand, settings: &Settings) -> Result<()> {
    match cmd.command {
        JobsSubcommand::List(args) => run_list(args, settings).await,
        JobsSubcommand::Show(args) => show(args, settings).await,
        JobsSubcommand::Post(args) => post(args, settings).await,
        JobsSubcommand::Apply(args) => apply(args, settings).await,
        JobsSubcommand::Status(args) => status(args, settings).await,
        JobsSubcommand::Export(args) => export(args, settings).await,
    }
}

fn render(job: &Job) {
    let title = format!("{} @ {}", job.title, job.company);
    output::row(
        job.id.as_str(),
        &title,
        &[
            Some(job.job_type.as_str()),
            job.location.as_deref(),
            job.category.as_deref(),
        ],
    );
}

async fn run_list(args: ListJobsArgs, settings: &Settings) -> Result<()> {
    let kind = match args.kind {
        None => Selector::All,
        Some(k) => Selector::only(JobType::from(k).as_str()),
    };
    list::run::<Job>(settings, &args.list, kind, render).await
}

async fn show(args: ShowJobArgs, settings: &Settings) -> Result<()> {
    let id = parse_id(&args.id, "job")?;
    let job: Job = match Source::open(settings).await? {
        Source::Session(s) => Fetcher::<Job>::fetch_one(&s, &id).await,
        Source::Anonymous(api) => Fetcher::<Job>::fetch_one(&api, &id).await,
    }
    .context("Failed to fetch job")?;

    if args.json {
        return output::json_pretty(&job);
    }

    output::field("Id", job.id.as_str());
    output::field("Title", &job.title);
    output::field("Company", &job.company);
    output::field("Type", job.job_type.as_str());
    output::field_opt("Location", job.location.as_deref());
    output::field_opt("Category", job.category.as_deref());
    if let Some(deadline) = job.deadline {
        output::field("Deadline", &deadline.format("%Y-%m-%d").to_string());
    }
    output::field_opt("Description", job.description.as_deref());
    Ok(())
}

async fn post(args: PostJobArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let job = session
        .post_job(&NewJob {
            title: args.title,
            company: args.company,
            job_type: args.kind.into(),
            location: args.location,
            category: args.category,
            description: args.description,
            deadline: args
                .deadline
                .map(|d| d.and_time(NaiveTime::MIN).and_utc()),
        })
        .await
        .context("Failed to post job")?;

    println!("{}", job.id);
    output::success(&format!("Posted '{}'", job.title));
    Ok(())
}

async fn apply(args: ApplyArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let id = parse_id(&args.id, "job")?;

    let resume = match args.resume {
        Some(path) => Some(read_attachment(&path).await?),
        None => None,
    };
    let form = ApplicationForm {
        cover_letter: args.cover_letter,
        resume,
    };

    let application = session
        .apply_to_job(&id, form)
        .await
        .context("Failed to apply")?;

    output::success(&format!("Applied to job {}", id));
    output::field("Application", application.id.as_str());
    Ok(())
}

async fn status(args: StatusArgs, settings: &Settings) -> Result<()> {
    let session = storage::require_session(settings).await?;
    let job = parse_id(&args.job, "job")?;
    let application = parse_id(&args.application, "application")?;

    let updated = session
        .update_application_status(&job, &application, args.status.into())
        .await
        .context("Failed to update application")?;

    output::success(&format!(
        "Application {} is now {:?}",
        updated.id, updated.status
    ));
    Ok(())
}

async fn export(args: ExportArgs, settings: &Settings) -> Result<()> {
    let page_size = settings.page_size;
    let mut pages: PageStream<Job> = match Source::open(settings).await? {
        Source::Session(session) => {
            let user = args.mine.then(|| session.member_id().clone());
            PageStream::new(session, page_size, user)?
        }
        Source::Anonymous(api) => {
            if args.mine {
                anyhow::bail!("--mine needs an active session. Run 'alumni login' first.");
            }
            PageStream::new(api, page_size, None)?
        }
    };

    let mut count = 0usize;
    while let Some(page) = pages.next().await {
        let page = page.context("Failed to fetch jobs")?;
        for job in &page.records {
            output::json(job)?;
        }
        count += page.len();
    }

    output::note(&format!("{} jobs exported", count));
    Ok(())
}

async fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());

    Ok(Attachment {
        mime_type: mime_for(path).to_string(),
        file_name,
        bytes,
    })
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_mime_follows_extension() {
        assert_eq!(mime_for(Path::new("cv.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("cv.txt")), "text/plain");
        assert_eq!(mime_for(Path::new("cv")), "application/octet-stream");
    }
}
