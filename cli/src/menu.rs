use std::io;
use std::str::FromStr;

use media_converter_core::processor::raster::ImageConverter;
use media_converter_core::processor::video::VideoConverter;
use media_converter_core::{EngineConfig, MediaKind};

use crate::prompt::{PromptReply, Prompter};
use crate::report;
use crate::shell::{run_shell, ShellOutcome};

const RULE: &str = "==================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Images,
    Videos,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "image" | "images" => Ok(Self::Images),
            "2" | "video" | "videos" => Ok(Self::Videos),
            "3" | "exit" | "quit" | "q" => Ok(Self::Exit),
            _ => Err(format!("unknown menu choice: {s}")),
        }
    }
}

/// Ask what to convert and run that shell once.
pub fn run_menu(prompter: &mut dyn Prompter, config: &EngineConfig) -> io::Result<ShellOutcome> {
    prompter.say(RULE);
    prompter.say("       FILE CONVERTER");
    prompter.say(RULE);
    prompter.say("");
    prompter.say("What would you like to convert?");
    prompter.say("  1) Images (JPEG, PNG, GIF, WEBP, AVIF, etc.)");
    prompter.say("  2) Videos (MP4, AVI, MOV, MKV, WEBM, etc.)");
    prompter.say("  3) Exit");

    loop {
        prompter.say("");
        let answer = match prompter.read_line("Enter your choice (1, 2, or 3)")? {
            PromptReply::Line(line) => line,
            PromptReply::Interrupted => return Ok(ShellOutcome::Cancelled),
        };

        let choice = match answer.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(_) => {
                prompter.say("Invalid choice. Please enter 1, 2, or 3.");
                continue;
            }
        };

        let outcome = match choice {
            MenuChoice::Exit => {
                prompter.say("Goodbye!");
                return Ok(ShellOutcome::Exited);
            }
            MenuChoice::Images => {
                prompter.say("");
                prompter.say(RULE);
                run_shell(prompter, &ImageConverter)?
            }
            MenuChoice::Videos => {
                prompter.say("");
                prompter.say(RULE);
                run_video_shell(prompter, config)?
            }
        };

        if !matches!(outcome, ShellOutcome::Cancelled) {
            prompter.say("");
            prompter.say(RULE);
        }
        return Ok(outcome);
    }
}

/// The video shell only starts once an ffmpeg executable has been found.
fn run_video_shell(prompter: &mut dyn Prompter, config: &EngineConfig) -> io::Result<ShellOutcome> {
    if config.auto_download && config.ffmpeg_override.is_none() {
        prompter.say("Note: ffmpeg will be downloaded automatically on first use if needed.");
        prompter.say("");
    }

    match VideoConverter::locate(config) {
        Ok(converter) => {
            log::info!("Using ffmpeg at {}", converter.program().display());
            run_shell(prompter, &converter)
        }
        Err(e) => {
            for line in report::failure_messages(&e, MediaKind::Video) {
                prompter.say(&line);
            }
            Ok(ShellOutcome::Failed(e))
        }
    }
}
