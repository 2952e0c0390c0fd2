//! Terminal-hosted render surfaces.
//!
//! The loading indicator and status lines go to the status stream so the
//! document on stdout stays clean for redirection.

use std::fs;
use std::io::{self, Stderr, Stdout, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use refwidget_core::{EmbedOptions, Frame, RenderSurface, ViewState};

const LOADING_INDICATOR: &str = "Loading referral widget...";
const DEFAULT_DOCUMENT_NAME: &str = "refwidget.html";

/// Writes the rendered document to an output stream.
pub struct PrintSurface<O, S> {
    options: EmbedOptions,
    out: O,
    status: S,
}

impl PrintSurface<Stdout, Stderr> {
    pub fn stdio(options: EmbedOptions) -> Self {
        Self::new(options, io::stdout(), io::stderr())
    }
}

impl<O: Write, S: Write> PrintSurface<O, S> {
    pub fn new(options: EmbedOptions, out: O, status: S) -> Self {
        Self {
            options,
            out,
            status,
        }
    }

    pub fn into_inner(self) -> (O, S) {
        (self.out, self.status)
    }
}

impl<O: Write, S: Write> RenderSurface for PrintSurface<O, S> {
    fn render(&mut self, state: &ViewState) -> Result<()> {
        match Frame::for_state(state, &self.options) {
            Frame::Indicator => writeln!(self.status, "{LOADING_INDICATOR}")?,
            Frame::Message(message) => writeln!(self.out, "{message}")?,
            Frame::Document(document) => self.out.write_all(document.as_bytes())?,
        }
        self.out.flush().context("Failed to flush output")
    }
}

/// Writes the document to disk and hands it to the system browser.
pub struct BrowserSurface<S> {
    options: EmbedOptions,
    path: PathBuf,
    open: bool,
    status: S,
}

impl BrowserSurface<Stderr> {
    pub fn stderr(options: EmbedOptions, path: Option<PathBuf>, open: bool) -> Self {
        Self::new(options, path, open, io::stderr())
    }
}

impl<S: Write> BrowserSurface<S> {
    pub fn new(options: EmbedOptions, path: Option<PathBuf>, open: bool, status: S) -> Self {
        Self {
            options,
            path: path.unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DOCUMENT_NAME)),
            open,
            status,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn show_document(&mut self, document: &str) -> Result<()> {
        fs::write(&self.path, document)
            .with_context(|| format!("Failed to write widget document {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "widget document written");

        if !self.open {
            writeln!(self.status, "Widget written to {}", self.path.display())?;
            return Ok(());
        }

        let target = self.path.to_string_lossy();
        match webbrowser::open(&target) {
            Ok(()) => writeln!(self.status, "Opening widget in browser: {target}")?,
            Err(err) => {
                tracing::warn!(error = %err, "failed to launch browser");
                writeln!(self.status, "Failed to open browser: {err}")?;
                writeln!(self.status, "Open {target} to view the widget")?;
            }
        }
        Ok(())
    }
}

impl<S: Write> RenderSurface for BrowserSurface<S> {
    fn render(&mut self, state: &ViewState) -> Result<()> {
        match Frame::for_state(state, &self.options) {
            Frame::Indicator => writeln!(self.status, "{LOADING_INDICATOR}")?,
            Frame::Message(message) => writeln!(self.status, "{message}")?,
            Frame::Document(document) => self.show_document(&document)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn print_surface_separates_status_from_document() {
        let mut surface = PrintSurface::new(EmbedOptions::default(), Vec::new(), Vec::new());
        surface.render(&ViewState::Loading).unwrap();
        surface
            .render(&ViewState::Ready("<p>hi</p>".into()))
            .unwrap();

        let (out, status) = surface.into_inner();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<p>hi</p>"));
        assert!(out.contains("<base href=\"https://ssqt.co\">"));
        assert_eq!(String::from_utf8(status).unwrap(), "Loading referral widget...\n");
    }

    #[test]
    fn print_surface_shows_error_message_only() {
        let mut surface = PrintSurface::new(EmbedOptions::default(), Vec::new(), Vec::new());
        surface
            .render(&ViewState::Error("Failed to fetch HTML content".into()))
            .unwrap();

        let (out, _) = surface.into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Failed to fetch HTML content\n"
        );
    }

    #[test]
    fn browser_surface_writes_document_without_opening() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("widget.html");
        let mut surface = BrowserSurface::new(
            EmbedOptions::default(),
            Some(target.clone()),
            false,
            Vec::new(),
        );

        surface
            .render(&ViewState::Ready("<div>widget</div>".into()))
            .unwrap();

        let written = fs::read_to_string(&target).unwrap();
        assert!(written.contains("<div>widget</div>"));
        let status = String::from_utf8(surface.status).unwrap();
        assert!(status.contains("Widget written to"));
    }

    #[test]
    fn browser_surface_does_not_write_on_error() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("widget.html");
        let mut surface = BrowserSurface::new(
            EmbedOptions::default(),
            Some(target.clone()),
            false,
            Vec::new(),
        );

        surface.render(&ViewState::Error("boom".into())).unwrap();

        assert!(!target.exists());
        assert_eq!(String::from_utf8(surface.status).unwrap(), "boom\n");
    }
}
