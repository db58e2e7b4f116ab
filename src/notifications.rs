/// Completion cue playback
/// Fire-and-forget: a cue that fails to play is dropped silently

#[cfg(target_os = "macos")]
use std::process::Command;

/// System sound played when a countdown reaches zero
#[cfg(target_os = "macos")]
const CUE_SOUND: &str = "/System/Library/Sounds/Glass.aiff";

/// Play the audible cue for a task whose countdown just hit zero
pub fn play_completion_cue(task_text: &str) {
    #[cfg(target_os = "macos")]
    {
        let _ = Command::new("afplay").arg(CUE_SOUND).spawn();

        let script = format!(
            r#"display notification "{}" with title "toki - Time Up""#,
            task_text.replace('"', "\\\"")
        );
        let _ = Command::new("osascript").arg("-e").arg(&script).spawn();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // Terminal bell; audible even inside the raw-mode TUI
        use std::io::Write;
        let _ = task_text;
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}
