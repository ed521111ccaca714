// Preview render loop
//
// Stands in for the host renderer: every re-render request coming through
// the ChannelHost becomes one recorded pass. The lifecycle and the loop
// share one task; `select!` interleaves them so requests raised while a
// hook is suspended render before the hook resumes.

use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;

use construct::events::MouseEventArgs;
use construct::render::{
    ChannelHost, ElementHandle, Frame, RecordingBuilder, RenderHost, RenderRequest,
};
use construct::{Component, EmitOptions, Fragment, LifecycleController, Page, ParameterView};

use crate::cli::RenderArgs;
use crate::config::{Config, OutputFormat, PageKind};
use crate::demo::{self, Counter, CounterData};

/// One recorded render pass
#[derive(Debug, Serialize)]
pub struct Pass {
    /// Render request that triggered this pass
    pub request: u32,
    /// Number of sequence numbers the pass consumed
    pub emitted: u32,
    /// Element references realized after the pass
    pub references: usize,
    pub frames: Vec<Frame>,
}

/// Everything a preview run produced
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub passes: Vec<Pass>,
    /// Lifecycle fault, if a hook failed
    pub fault: Option<String>,
    /// Clicks that found no listener
    pub unhandled_clicks: u32,
}

/// Mount the configured page and record its passes
pub async fn run(config: &Config, args: &RenderArgs) -> Result<Report> {
    let options = config.render.emit_options()?;
    let page = args.page.unwrap_or(config.preview.page);

    let (channel, requests) = ChannelHost::new();
    let channel = Rc::new(channel);
    let host: Rc<dyn RenderHost> = channel.clone();

    tracing::info!("Mounting {} page", page.as_str());
    match page {
        PageKind::Counter => {
            let delay = Duration::from_millis(config.preview.init_delay_ms);
            let counter = Counter::new(host.clone(), delay);
            let parent = Fragment::component_with::<Counter>(CounterData::default());
            mount(counter, &parent, host, requests, options, args.clicks).await
        }
        PageKind::Profile => {
            let page = demo::profile_page(&host);
            let parent = Fragment::component_with::<Page>(demo::profile_links());
            mount(page, &parent, host, requests, options, args.clicks).await
        }
    }
}

async fn mount<C>(
    component: C,
    parent: &Fragment,
    host: Rc<dyn RenderHost>,
    mut requests: UnboundedReceiver<RenderRequest>,
    options: EmitOptions,
    clicks: u32,
) -> Result<Report>
where
    C: Component,
    C::Data: Clone,
{
    let controller = LifecycleController::new(component, host).with_options(options);
    let mut report = Report::default();
    let mut last = None;

    let delivered = {
        let parameters = ParameterView::from_fragment(parent);
        let mut lifecycle = pin!(controller.receive_parameters(parameters));
        loop {
            tokio::select! {
                biased;
                Some(request) = requests.recv() => {
                    last = Some(record(&controller, request, &mut report)?);
                }
                result = &mut lifecycle => break result,
            }
        }
    };
    if let Err(fault) = delivered {
        tracing::warn!("Lifecycle fault: {}", fault);
        report.fault = Some(fault.to_string());
    }
    if let Some(builder) = drain(&controller, &mut requests, &mut report)? {
        last = Some(builder);
    }

    for click in 1..=clicks {
        let Some(builder) = &last else {
            break;
        };
        let payload = MouseEventArgs {
            detail: i64::from(click),
            ..MouseEventArgs::default()
        };
        if !builder.dispatch("onclick", &payload)? {
            tracing::warn!("Click {} found no listener", click);
            report.unhandled_clicks += 1;
            continue;
        }
        if let Some(builder) = drain(&controller, &mut requests, &mut report)? {
            last = Some(builder);
        }
    }

    Ok(report)
}

/// Render every request already queued
fn drain<C: Component>(
    controller: &LifecycleController<C>,
    requests: &mut UnboundedReceiver<RenderRequest>,
    report: &mut Report,
) -> Result<Option<RecordingBuilder>> {
    let mut last = None;
    while let Ok(request) = requests.try_recv() {
        last = Some(record(controller, request, report)?);
    }
    Ok(last)
}

fn record<C: Component>(
    controller: &LifecycleController<C>,
    request: RenderRequest,
    report: &mut Report,
) -> Result<RecordingBuilder> {
    let mut builder = RecordingBuilder::new();
    let emitted = controller.render(&mut builder)?;
    let references = builder.realize_references(|sequence| ElementHandle {
        id: format!("el-{}-{}", request.ordinal, sequence),
    });

    tracing::debug!(
        "Pass for request {} emitted {} instructions",
        request.ordinal,
        builder.len()
    );
    report.passes.push(Pass {
        request: request.ordinal,
        emitted,
        references,
        frames: builder.frames().to_vec(),
    });
    Ok(builder)
}

/// Print the report in the requested format
pub fn print(report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            for (index, pass) in report.passes.iter().enumerate() {
                println!(
                    "── pass {} (request {}, {} instructions, {} references) ──",
                    index + 1,
                    pass.request,
                    pass.frames.len(),
                    pass.references
                );
                for frame in &pass.frames {
                    println!("{:>4}  {}", frame.sequence, frame.kind);
                }
            }
            if let Some(fault) = &report.fault {
                println!("fault: {}", fault);
            }
            if report.unhandled_clicks > 0 {
                println!("unhandled clicks: {}", report.unhandled_clicks);
            }
        }
    }
    Ok(())
}
