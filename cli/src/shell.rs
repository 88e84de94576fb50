//! The interactive conversion shell.
//!
//! A shell walks a fixed sequence of [`ShellStep`]s. Each step prompts,
//! validates and either records its answer or stops the shell with a
//! [`ShellOutcome`]. Bad answers to optional questions fall back to defaults;
//! bad answers to required ones abort with a message, never a crash.

use std::io;
use std::path::PathBuf;

use media_converter_core::resolve::default_output_path;
use media_converter_core::{
    pipeline, ConversionRequest, ConvertError, Converter, FormatRegistry, FormatSpec, MediaKind,
    Quality, VideoQuality,
};

use crate::prompt::{clean_path_input, PromptReply, Prompter};
use crate::report;

/// How a shell session ended.
#[derive(Debug)]
pub enum ShellOutcome {
    Converted(PathBuf),
    /// Stopped on invalid or empty input; the message was already shown.
    Aborted(String),
    /// Interrupted at a prompt.
    Cancelled,
    /// Exit chosen from the menu.
    Exited,
    Failed(ConvertError),
}

impl ShellOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Converted(_) | Self::Aborted(_) | Self::Cancelled | Self::Exited => 0,
            Self::Failed(e) => e.exit_code(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStep {
    ChooseFormat,
    InputPath,
    OutputPath,
    Quality,
    Codec,
    /// Terminal: runs the conversion.
    Convert,
}

impl ShellStep {
    /// The step that follows this one. Quality is only asked for lossy image
    /// formats and for video; codec only for video that is re-encoded.
    pub fn next(self, kind: MediaKind, lossy: bool, copy: bool) -> ShellStep {
        match (self, kind) {
            (Self::ChooseFormat, _) => Self::InputPath,
            (Self::InputPath, _) => Self::OutputPath,
            (Self::OutputPath, MediaKind::Image) if !lossy => Self::Convert,
            (Self::OutputPath, _) => Self::Quality,
            (Self::Quality, MediaKind::Video) if !copy => Self::Codec,
            (Self::Quality, _) => Self::Convert,
            (Self::Codec, _) | (Self::Convert, _) => Self::Convert,
        }
    }
}

/// Interpret a format answer: a name (aliases allowed) or a 1-based ordinal.
pub fn parse_format_choice(
    registry: &FormatRegistry,
    answer: &str,
) -> Result<&'static FormatSpec, String> {
    let answer = answer.trim().to_lowercase();
    if !answer.is_empty() && answer.chars().all(|c| c.is_ascii_digit()) {
        let count = registry.formats().len();
        return answer
            .parse::<usize>()
            .ok()
            .and_then(|n| registry.by_ordinal(n))
            .ok_or_else(|| format!("Invalid choice. Please enter a number between 1 and {count}."));
    }
    registry.get(&answer).ok_or_else(|| {
        format!(
            "Invalid format: {answer}\nSupported formats: {}",
            registry.supported_list()
        )
    })
}

enum Flow {
    Continue,
    Stop(ShellOutcome),
}

#[derive(Debug, Default)]
struct Draft {
    format: Option<&'static FormatSpec>,
    input: PathBuf,
    output: Option<PathBuf>,
    quality: Quality,
    video_quality: VideoQuality,
    codec: Option<String>,
}

/// Run one shell session for the converter's media kind.
///
/// I/O errors on the terminal itself are returned; everything the user or the
/// engine does wrong ends up in the [`ShellOutcome`].
pub fn run_shell(
    prompter: &mut dyn Prompter,
    converter: &dyn Converter,
) -> io::Result<ShellOutcome> {
    let mut shell = Shell {
        prompter,
        converter,
        draft: Draft::default(),
    };
    shell.run()
}

struct Shell<'p, 'c> {
    prompter: &'p mut dyn Prompter,
    converter: &'c dyn Converter,
    draft: Draft,
}

impl Shell<'_, '_> {
    fn kind(&self) -> MediaKind {
        self.converter.kind()
    }

    fn run(&mut self) -> io::Result<ShellOutcome> {
        let mut step = ShellStep::ChooseFormat;
        loop {
            log::debug!("Shell step {:?}", step);
            if let Flow::Stop(outcome) = self.perform(step)? {
                return Ok(outcome);
            }
            let lossy = self.draft.format.is_some_and(|f| f.lossy);
            step = step.next(self.kind(), lossy, self.draft.video_quality.is_copy());
        }
    }

    /// `None` when the user interrupted the prompt.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(match self.prompter.read_line(prompt)? {
            PromptReply::Line(line) => Some(line),
            PromptReply::Interrupted => None,
        })
    }

    fn abort(&mut self, message: String) -> Flow {
        self.prompter.say(&message);
        Flow::Stop(ShellOutcome::Aborted(message))
    }

    fn perform(&mut self, step: ShellStep) -> io::Result<Flow> {
        match step {
            ShellStep::ChooseFormat => self.choose_format(),
            ShellStep::InputPath => self.input_path(),
            ShellStep::OutputPath => self.output_path(),
            ShellStep::Quality => match self.kind() {
                MediaKind::Image => self.image_quality(),
                MediaKind::Video => self.video_quality(),
            },
            ShellStep::Codec => self.codec(),
            ShellStep::Convert => Ok(Flow::Stop(self.convert())),
        }
    }

    fn choose_format(&mut self) -> io::Result<Flow> {
        let registry = self.converter.registry();
        let title = match self.kind() {
            MediaKind::Image => "=== Image Converter ===",
            MediaKind::Video => "=== Video Converter ===",
        };
        self.prompter.say(title);
        self.prompter.say("");
        self.prompter.say("Supported output formats:");
        for (i, format) in registry.formats().iter().enumerate() {
            self.prompter.say(&format!("  {}) {}", i + 1, format.display_name()));
        }
        self.prompter.say("");

        let Some(answer) = self.ask("Enter output format (name or number)")? else {
            return Ok(Flow::Stop(ShellOutcome::Cancelled));
        };
        match parse_format_choice(registry, &answer) {
            Ok(format) => {
                self.draft.format = Some(format);
                Ok(Flow::Continue)
            }
            Err(message) => Ok(self.abort(message)),
        }
    }

    fn input_path(&mut self) -> io::Result<Flow> {
        let prompt = format!("Enter path to input {} file", self.kind().as_str());
        let Some(answer) = self.ask(&prompt)? else {
            return Ok(Flow::Stop(ShellOutcome::Cancelled));
        };
        let input = clean_path_input(&answer);
        if input.is_empty() {
            return Ok(self.abort("No input provided. Exiting.".to_string()));
        }
        self.draft.input = PathBuf::from(input);
        Ok(Flow::Continue)
    }

    fn output_path(&mut self) -> io::Result<Flow> {
        let default = self
            .draft
            .format
            .map(|f| default_output_path(&self.draft.input, f));
        let prompt = match &default {
            Some(path) => format!("Enter output path [default: {}]", path.display()),
            None => "Enter output path".to_string(),
        };
        let Some(answer) = self.ask(&prompt)? else {
            return Ok(Flow::Stop(ShellOutcome::Cancelled));
        };
        let output = clean_path_input(&answer);
        self.draft.output = if output.is_empty() {
            default
        } else {
            Some(PathBuf::from(output))
        };
        Ok(Flow::Continue)
    }

    fn image_quality(&mut self) -> io::Result<Flow> {
        let prompt = format!(
            "Enter quality ({}-{}) [default: {}]",
            Quality::MIN,
            Quality::MAX,
            Quality::DEFAULT
        );
        let Some(answer) = self.ask(&prompt)? else {
            return Ok(Flow::Stop(ShellOutcome::Cancelled));
        };
        self.draft.quality = if answer.trim().is_empty() {
            Quality::DEFAULT
        } else {
            answer.parse::<Quality>().unwrap_or_else(|reason| {
                log::warn!("Rejected quality {:?}: {}", answer.trim(), reason);
                self.prompter.say(&format!(
                    "Invalid quality ({reason}). Using default: {}",
                    Quality::DEFAULT
                ));
                Quality::DEFAULT
            })
        };
        Ok(Flow::Continue)
    }

    fn video_quality(&mut self) -> io::Result<Flow> {
        self.prompter.say("");
        self.prompter.say("Quality options:");
        for (i, preset) in VideoQuality::ALL.iter().enumerate() {
            self.prompter.say(&format!("  {}) {}", i + 1, preset.description()));
        }
        let Some(answer) = self.ask("Enter quality (1-4) [default: 2]")? else {
            return Ok(Flow::Stop(ShellOutcome::Cancelled));
        };
        self.draft.video_quality = if answer.trim().is_empty() {
            VideoQuality::default()
        } else {
            answer.parse::<VideoQuality>().unwrap_or_else(|reason| {
                log::warn!("{}", reason);
                self.prompter.say(&format!(
                    "Unknown quality choice. Using default: {}",
                    VideoQuality::default()
                ));
                VideoQuality::default()
            })
        };
        Ok(Flow::Continue)
    }

    fn codec(&mut self) -> io::Result<Flow> {
        let prompt = "Enter codec (h264, h265, vp9, or press Enter for default)";
        let Some(answer) = self.ask(prompt)? else {
            return Ok(Flow::Stop(ShellOutcome::Cancelled));
        };
        let codec = answer.trim().to_lowercase();
        self.draft.codec = (!codec.is_empty()).then_some(codec);
        Ok(Flow::Continue)
    }

    fn convert(&mut self) -> ShellOutcome {
        let kind = self.kind();
        let draft = std::mem::take(&mut self.draft);
        let Some(format) = draft.format else {
            return ShellOutcome::Aborted("No output format selected.".to_string());
        };

        self.prompter.say("");
        self.prompter.say("Converting:");
        self.prompter.say(&format!("  Input: {}", draft.input.display()));
        if let Some(output) = &draft.output {
            self.prompter.say(&format!("  Output: {}", output.display()));
        }
        self.prompter.say(&format!("  Format: {}", format.display_name()));
        match kind {
            MediaKind::Image if format.lossy => {
                self.prompter.say(&format!("  Quality: {}", draft.quality));
            }
            MediaKind::Image => {}
            MediaKind::Video => {
                self.prompter.say(&format!("  Quality: {}", draft.video_quality));
                if let Some(codec) = &draft.codec {
                    self.prompter.say(&format!("  Codec: {codec}"));
                }
                self.prompter.say("");
                self.prompter.say("This may take a while...");
            }
        }

        let mut request = ConversionRequest::new(draft.input)
            .output_format(format.name)
            .quality(draft.quality)
            .video_quality(draft.video_quality);
        request.output_path = draft.output;
        request.codec = draft.codec;

        match pipeline::run(self.converter, request) {
            Ok(path) => {
                self.prompter.say(&report::success_message(&path));
                ShellOutcome::Converted(path)
            }
            Err(e) => {
                for line in report::failure_messages(&e, kind) {
                    self.prompter.say(&line);
                }
                ShellOutcome::Failed(e)
            }
        }
    }
}
