//! The conversion itself: one SVG file in, one XML trace file out.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use rsvg::{CairoRenderer, Loader, SvgHandle};

use crate::error::ConvertError;
use crate::session::Session;
use crate::sizing::{self, Dimensions};
use crate::xml_device::XmlDevice;

/// Resolution used to resolve physical units like `cm` to pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dpi {
    x: f64,
    y: f64,
}

impl Dpi {
    /// Returns `None` unless both resolutions are positive and finite.
    pub fn new(x: f64, y: f64) -> Option<Dpi> {
        let valid = |v: f64| v.is_finite() && v > 0.0;

        if valid(x) && valid(y) {
            Some(Dpi { x, y })
        } else {
            None
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Options for rendering the document.
///
/// The command-line program always uses the defaults.
#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Resolution override; `None` keeps librsvg's default resolution.
    pub dpi: Option<Dpi>,
}

/// Converts one SVG file into one cairo XML trace file.
///
/// The output always has the shape
///
/// ```text
/// <image width='W' height='H'>
/// ...cairo XML trace...
/// </image>
/// ```
pub struct Converter {
    input: PathBuf,
    output: PathBuf,
    options: ConvertOptions,
    session: Session,
}

impl Converter {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Converter {
            input: input.into(),
            output: output.into(),
            options: ConvertOptions::default(),
            session: Session::new(),
        }
    }

    pub fn with_options(self, options: ConvertOptions) -> Self {
        Converter { options, ..self }
    }

    pub fn with_session(self, session: Session) -> Self {
        Converter { session, ..self }
    }

    /// Runs the conversion.
    ///
    /// The input is checked for readability before the output file is touched, so
    /// a missing input never creates or truncates the output.
    pub fn convert(&self) -> Result<(), ConvertError> {
        self.probe_input()?;
        let mut output = self.open_output()?;

        let handle = self.load()?;
        let renderer = self.renderer(&handle);

        let dimensions =
            sizing::document_dimensions(&renderer).map_err(|source| ConvertError::Size {
                path: self.input.clone(),
                source,
            })?;

        convert_log!(
            self.session,
            "{}: {} x {} pixels",
            self.input.display(),
            dimensions.width,
            dimensions.height
        );

        writeln!(
            output,
            "<image width='{}' height='{}'>",
            dimensions.width, dimensions.height
        )
        .map_err(|e| self.write_error(e))?;

        let device = XmlDevice::for_stream(output).map_err(|e| self.cairo_error(e))?;

        let rendered = self.render_trace(&device, &renderer, dimensions);

        // A failed write makes cairo fail as well; report the write error, which is
        // the one that says what actually went wrong.
        let mut output = device.finish().map_err(|e| self.write_error(e))?;
        rendered?;

        writeln!(output, "</image>")
            .and_then(|_| output.flush())
            .map_err(|e| self.write_error(e))?;

        convert_log!(self.session, "wrote {}", self.output.display());

        Ok(())
    }

    fn probe_input(&self) -> Result<(), ConvertError> {
        File::open(&self.input)
            .map(drop)
            .map_err(|source| ConvertError::InputOpen {
                path: self.input.clone(),
                source,
            })
    }

    fn open_output(&self) -> Result<BufWriter<File>, ConvertError> {
        File::create(&self.output)
            .map(BufWriter::new)
            .map_err(|source| ConvertError::OutputOpen {
                path: self.output.clone(),
                source,
            })
    }

    fn load(&self) -> Result<SvgHandle, ConvertError> {
        convert_log!(self.session, "loading {}", self.input.display());

        Loader::new()
            .read_path(&self.input)
            .map_err(|source| ConvertError::Load {
                path: self.input.clone(),
                source,
            })
    }

    fn renderer<'a>(&self, handle: &'a SvgHandle) -> CairoRenderer<'a> {
        let renderer = CairoRenderer::new(handle);

        match self.options.dpi {
            Some(dpi) => renderer.with_dpi(dpi.x(), dpi.y()),
            None => renderer,
        }
    }

    /// Renders the document onto a fresh XML surface of the device.
    ///
    /// The context is released before the surface, and the surface before this
    /// function returns, whether rendering succeeded or not.
    fn render_trace<W: Write>(
        &self,
        device: &XmlDevice<W>,
        renderer: &CairoRenderer<'_>,
        dimensions: Dimensions,
    ) -> Result<(), ConvertError> {
        let surface = device
            .create_surface(
                cairo::Content::ColorAlpha,
                f64::from(dimensions.width),
                f64::from(dimensions.height),
            )
            .map_err(|e| self.cairo_error(e))?;

        {
            let cr = cairo::Context::new(&surface).map_err(|e| self.cairo_error(e))?;

            if dimensions.is_empty() {
                convert_log!(
                    self.session,
                    "{} has an empty size; nothing to render",
                    self.input.display()
                );
            } else {
                renderer
                    .render_document(&cr, &dimensions.viewport())
                    .map_err(|source| ConvertError::Render {
                        path: self.input.clone(),
                        source,
                    })?;
            }
        }

        surface.finish().map_err(|e| self.cairo_error(e))
    }

    fn write_error(&self, source: io::Error) -> ConvertError {
        ConvertError::Write {
            path: self.output.clone(),
            source,
        }
    }

    fn cairo_error(&self, source: cairo::Error) -> ConvertError {
        ConvertError::Cairo {
            path: self.output.clone(),
            source,
        }
    }
}
