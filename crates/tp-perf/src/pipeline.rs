//! Run drivers: stream a source, select jets, fill a root, write once.

use std::path::{Path, PathBuf};

use tp_core::{EventBuffer, FullBuffer, JetRecord, ReducedBuffer, Result};
use tp_io::{JetStream, JsonLinesSource, OutputFile};

use crate::config::PerfConfig;
use crate::peter;
use crate::perf_hists::JetPerfHists;

/// Counts from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Events read.
    pub events: usize,
    /// Jets in the events read.
    pub total_jets: usize,
    /// Jets that passed the selection and were filled.
    pub selected_jets: usize,
    /// Output written.
    pub output: PathBuf,
}

/// Fill [`JetPerfHists`] from full-schema files and write them to `out`.
///
/// `out` must not exist; this is checked before any input is read.
pub fn build_hists<P: AsRef<Path>>(
    files: &[P],
    out: &Path,
    config: PerfConfig,
) -> Result<RunSummary> {
    let mut output = OutputFile::create(out)?;
    let limit = config.event_limit();
    let mut source = JsonLinesSource::<FullBuffer>::open_limited(files, Some(limit))?;
    let selection = config.selection;
    let mut hists = JetPerfHists::new(config)?;

    let mut stream = JetStream::new(&mut source, JetRecord::from_full_schema, Some(limit));
    log::info!("starting loop on {} events", stream.n_events());
    let mut selected = 0;
    for jet in stream.by_ref() {
        let jet = jet?;
        if !selection.passes_kinematics(&jet) {
            continue;
        }
        hists.fill(&jet, 1.0)?;
        selected += 1;
    }
    let (events, total_jets) = (stream.events_read(), stream.total_jets());
    log::info!("done event loop, saving");

    hists.write_to(output.root_mut())?;
    output.close()?;
    Ok(RunSummary { events, total_jets, selected_jets: selected, output: out.to_path_buf() })
}

/// Fill [`peter::FlavoredHists`] from reduced-schema files and write them to `out`.
///
/// Applies the JVF cut on top of the kinematic selection. In test mode the
/// raw fields read are listed in `required_branches.txt` next to `out`.
pub fn fill_peters_hists<P: AsRef<Path>>(
    files: &[P],
    out: &Path,
    config: PerfConfig,
) -> Result<RunSummary> {
    let mut output = OutputFile::create(out)?;
    let limit = config.event_limit();
    let mut source = JsonLinesSource::<ReducedBuffer>::open_limited(files, Some(limit))?;
    let test = config.test_mode;
    let selection = config.selection;
    let mut hists = peter::FlavoredHists::new(config)?;

    let mut stream = JetStream::new(&mut source, JetRecord::from_reduced_schema, Some(limit));
    log::info!("starting loop on {} events", stream.n_events());
    let mut selected = 0;
    for jet in stream.by_ref() {
        let jet = jet?;
        if !selection.passes_kinematics(&jet) || !selection.jvf.passes(&jet) {
            continue;
        }
        hists.fill(&jet, 1.0)?;
        selected += 1;
    }
    let (events, total_jets) = (stream.events_read(), stream.total_jets());

    if test {
        save_required_fields::<ReducedBuffer>(&out.with_file_name("required_branches.txt"))?;
    }
    log::info!("done event loop, saving");

    hists.write_to(output.root_mut())?;
    output.close()?;
    Ok(RunSummary { events, total_jets, selected_jets: selected, output: out.to_path_buf() })
}

fn save_required_fields<B: EventBuffer>(path: &Path) -> Result<()> {
    let mut text = String::new();
    for field in B::FIELDS {
        text.push_str(field);
        text.push('\n');
    }
    std::fs::write(path, text)?;
    log::debug!("saved {} field names to {}", B::FIELDS.len(), path.display());
    Ok(())
}
