// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless playback of a demo script.

use crate::error::AppError;
use crate::script::DemoScript;
use pathplay_motion::{FixedRateClock, FrameClock};
use pathplay_render::{FrameRecorder, RecordedFrame, Renderer};
use serde::Serialize;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Script name
    pub script: String,
    /// Updates issued
    pub frames_ticked: usize,
    /// Updates that repainted
    pub frames_painted: u64,
    /// Draw commands across all painted frames
    pub draw_commands: usize,
    /// Motions started
    pub motions_started: usize,
    /// Motions that completed
    pub motions_finished: usize,
    /// Timestamp of the last update in milliseconds
    pub elapsed_ms: f64,
}

impl RunReport {
    /// Motions still running when the frame budget ran out
    pub fn motions_running(&self) -> usize {
        self.motions_started - self.motions_finished
    }
}

/// Report plus every recorded frame
pub struct RunOutput {
    /// Summary
    pub report: RunReport,
    /// Frames in paint order
    pub frames: Vec<RecordedFrame>,
}

/// Play `script` on a fixed-rate clock until every motion finishes or the
/// frame budget is spent
pub fn run_script(script: &DemoScript) -> Result<RunOutput, AppError> {
    let built = script.build_scene()?;
    let mut recorder = FrameRecorder::new(script.settings.clone());

    let mut handles = Vec::with_capacity(script.motions.len());
    for motion in &script.motions {
        let (target, path) = script.motion_target(&built, motion)?;
        handles.push(recorder.move_by(&target, path, motion.options)?);
    }
    tracing::info!(
        "Playing '{}': {} elements, {} motions, at most {} frames",
        script.name,
        built.scene.element_count() + built.scene.temporary_object_count(),
        handles.len(),
        script.max_frames
    );

    let mut clock = FixedRateClock::new(script.frame_rate);
    let mut frames_ticked = 0;
    let mut elapsed_ms = 0.0;
    while frames_ticked < script.max_frames {
        elapsed_ms = clock.next_frame();
        recorder.update(&built.scene, elapsed_ms);
        frames_ticked += 1;
        if recorder.timeline().is_idle() {
            break;
        }
    }

    let frames = recorder.take_frames();
    let report = RunReport {
        script: script.name.clone(),
        frames_ticked,
        frames_painted: recorder.frames_painted(),
        draw_commands: frames.iter().map(|frame| frame.commands.len()).sum(),
        motions_started: handles.len(),
        motions_finished: handles.iter().filter(|handle| handle.is_finished()).count(),
        elapsed_ms,
    };
    if report.motions_running() > 0 {
        tracing::warn!(
            "Frame budget reached with {} motions still running",
            report.motions_running()
        );
    }
    Ok(RunOutput { report, frames })
}

/// Write frames as pretty-printed JSON
pub fn export_frames_json(frames: &[RecordedFrame], path: &std::path::Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(frames)?;
    std::fs::write(path, json)?;
    tracing::info!("Exported {} frames to {}", frames.len(), path.display());
    Ok(())
}
