use crate::infra::InMemoryRecordStore;
use ats_dashboard::config::{AppConfig, ProjectionConfig};
use ats_dashboard::dashboard::{DashboardService, ViewQuery};
use ats_dashboard::error::AppError;
use ats_dashboard::projector::{project, ProjectedView, StageGroup, ViewParameters};
use ats_dashboard::records::{
    load_records, Candidate, Customer, EntityKind, Interview, Job, Projectable, RecordId,
};
use ats_dashboard::session::Session;
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// Record kind stored in the input file (jobs, candidates, interviews, customers)
    #[arg(long)]
    pub(crate) kind: EntityKind,
    /// JSON or CSV file holding the records
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Case-insensitive substring matched against the searchable fields
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Only keep records in this status ("all" disables the filter)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Field to sort by
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Sort descending instead of ascending
    #[arg(long)]
    pub(crate) desc: bool,
    /// 1-based page to show; out of range values are clamped
    #[arg(long)]
    pub(crate) page: Option<usize>,
    /// Records per page (defaults to ATS_PAGE_SIZE)
    #[arg(long)]
    pub(crate) page_size: Option<usize>,
    /// Show every record of this stage instead of the preview
    #[arg(long)]
    pub(crate) expand: Vec<String>,
    /// Print the projected view as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl ViewArgs {
    fn query(&self) -> ViewQuery {
        ViewQuery {
            search: self.search.clone(),
            status: self.status.clone(),
            sort: self.sort.clone(),
            direction: self.desc.then(|| "desc".to_string()),
            page: self.page,
            page_size: self.page_size,
            expanded: (!self.expand.is_empty()).then(|| self.expand.join(",")),
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Stage to show in full after the pipeline update
    #[arg(long, default_value = "Applied")]
    pub(crate) expand: String,
    /// Cards shown per stage before truncating (defaults to ATS_STAGE_PREVIEW)
    #[arg(long)]
    pub(crate) stage_preview: Option<usize>,
}

pub(crate) fn run_view(args: ViewArgs) -> Result<(), AppError> {
    let projection = AppConfig::load()?.projection;

    let lines = match args.kind {
        EntityKind::Jobs => render_file::<Job>(&args, projection)?,
        EntityKind::Candidates => render_file::<Candidate>(&args, projection)?,
        EntityKind::Interviews => render_file::<Interview>(&args, projection)?,
        EntityKind::Customers => render_file::<Customer>(&args, projection)?,
    };

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn render_file<R>(args: &ViewArgs, projection: ProjectionConfig) -> Result<Vec<String>, AppError>
where
    R: Projectable + Clone + Serialize + DeserializeOwned,
{
    let records = load_records::<R, _>(&args.input)?;
    let defaults = ViewParameters::new().with_page_size(projection.page_size);
    let params = args.query().into_parameters::<R>(defaults)?;
    let view = project(&records, &params, projection.visible_per_stage);

    if args.json {
        let rendered = match serde_json::to_string_pretty(&view) {
            Ok(json) => json,
            Err(err) => format!("View payload unavailable: {err}"),
        };
        return Ok(vec![rendered]);
    }

    Ok(view_lines(R::KIND, &view))
}

pub(crate) fn view_lines<R: Projectable>(kind: EntityKind, view: &ProjectedView<R>) -> Vec<String> {
    if view.is_empty() {
        return vec![format!("{}: No results", kind.label())];
    }

    let mut lines = vec![format!(
        "{}: {} matching (page {} of {}, {} per page)",
        kind.label(),
        view.total(),
        view.page,
        view.total_pages,
        view.page_size
    )];
    for record in &view.paged {
        lines.push(format!(
            "  [{}] {} | {}",
            record.record_id(),
            display_title(record),
            record.status()
        ));
    }

    lines.push("Pipeline".to_string());
    lines.extend(board_lines(&view.stage_groups));
    lines
}

pub(crate) fn board_lines<R: Projectable>(groups: &[StageGroup<R>]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        if group.is_truncated() {
            lines.push(format!(
                "  {}: {} (showing {}, {} hidden; expand with --expand {})",
                group.stage(),
                group.total(),
                group.visible_records().len(),
                group.hidden(),
                group.stage()
            ));
        } else {
            lines.push(format!("  {}: {}", group.stage(), group.total()));
        }
        for record in group.visible_records() {
            lines.push(format!("    - {}", display_title(record)));
        }
    }
    lines
}

fn display_title<R: Projectable>(record: &R) -> &str {
    match record.title() {
        "" => "(untitled)",
        title => title,
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        expand,
        stage_preview,
    } = args;

    let mut projection = ProjectionConfig::default();
    if let Some(preview) = stage_preview {
        projection.visible_per_stage = preview;
    }

    let store = Arc::new(InMemoryRecordStore::with_records(demo_candidates()));
    let service = DashboardService::new(store, projection);

    println!("ATS pipeline demo");
    let board = service.view(&service.default_parameters())?;
    for line in board_lines(&board.stage_groups) {
        println!("{line}");
    }

    let session = match Session::bearer("demo-session") {
        Ok(session) => session,
        Err(err) => {
            println!("  Session unavailable: {}", err);
            return Ok(());
        }
    };

    let mut draft = service.begin_edit(&RecordId::from("11"))?;
    draft.edit(|candidate| candidate.status = "Interview".to_string());
    match service.save(&session, draft) {
        Ok(saved) => println!(
            "\nMoved {} to {}",
            display_title(&saved),
            saved.status
        ),
        Err(err) => println!("\n  Save failed: {}", err),
    }

    println!("\nPipeline with {} expanded", expand);
    let params = service.default_parameters().with_expanded(expand);
    let board = service.view(&params)?;
    for line in board_lines(&board.stage_groups) {
        println!("{line}");
    }

    println!("\nObserved stages: {}", service.statuses()?.join(", "));
    Ok(())
}

fn demo_candidates() -> Vec<Candidate> {
    let roster = [
        ("Priya Raman", "Frontend Engineer", "Applied", 4.2),
        ("Marcus Lee", "Frontend Engineer", "Applied", 3.8),
        ("Sofia Alvarez", "Data Engineer", "Applied", 4.5),
        ("Tomasz Nowak", "Data Engineer", "Applied", 3.1),
        ("Amara Okafor", "Product Designer", "Applied", 4.0),
        ("Jonas Berg", "Frontend Engineer", "Applied", 3.6),
        ("Lena Fischer", "Site Reliability Engineer", "Applied", 4.7),
        ("Ravi Patel", "Data Engineer", "Applied", 3.9),
        ("Hana Sato", "Product Designer", "Screening", 4.4),
        ("Diego Santos", "Frontend Engineer", "Screening", 4.1),
        ("Chloe Martin", "Site Reliability Engineer", "Screening", 4.6),
        ("Kwame Mensah", "Data Engineer", "Interview", 4.3),
        ("Elif Demir", "Frontend Engineer", "Offer", 4.8),
        ("Noah Williams", "Product Designer", "Hired", 4.9),
    ];

    roster
        .iter()
        .enumerate()
        .map(|(index, (name, job_title, status, rating))| Candidate {
            id: RecordId::from((index + 1).to_string().as_str()),
            name: Some((*name).to_string()),
            email: Some(format!(
                "{}@example.com",
                name.to_ascii_lowercase().replace(' ', ".")
            )),
            phone: None,
            job_title: Some((*job_title).to_string()),
            status: (*status).to_string(),
            experience_years: None,
            rating: Some(*rating),
            created_at: Some(format!("2024-06-{:02}T09:00:00Z", index + 1)),
        })
        .collect()
}
