//! cairo's XML trace device, writing into a Rust stream.
//!
//! cairo can record every drawing operation performed on an XML surface and
//! serialize it as XML through a write callback.  cairo-rs does not bind the
//! `cairo-xml.h` entry points, so they are declared here and wrapped in two
//! types:
//!
//! * [`XmlDevice`] owns the cairo device and the stream it writes to.
//!
//! * [`XmlSurface`] is a surface bound to a device.  It borrows the device, so
//!   the device cannot be finished while one of its surfaces is still alive.
//!
//! The stream is moved into the device when it is created, and handed back by
//! [`XmlDevice::finish`] once cairo is done with it.

use std::cell::RefCell;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::ops::Deref;
use std::os::raw::{c_double, c_uchar, c_uint, c_void};
use std::ptr;
use std::slice;

use cairo::ffi;

extern "C" {
    fn cairo_xml_create_for_stream(
        write_func: ffi::cairo_write_func_t,
        closure: *mut c_void,
    ) -> *mut ffi::cairo_device_t;

    fn cairo_xml_surface_create(
        xml: *mut ffi::cairo_device_t,
        content: ffi::cairo_content_t,
        width: c_double,
        height: c_double,
    ) -> *mut ffi::cairo_surface_t;
}

/// The closure that cairo passes back to [`write_callback`].
struct Sink<W> {
    writer: Option<W>,

    // The first write error; once set, no more data is written.
    io_error: Option<io::Error>,
}

unsafe extern "C" fn write_callback<W: Write>(
    closure: *mut c_void,
    data: *mut c_uchar,
    length: c_uint,
) -> ffi::cairo_status_t {
    let sink = &*(closure as *const RefCell<Sink<W>>);

    let Ok(mut sink) = sink.try_borrow_mut() else {
        return ffi::STATUS_WRITE_ERROR;
    };

    let Sink {
        writer: Some(writer),
        io_error: io_error @ None,
    } = &mut *sink
    else {
        return ffi::STATUS_WRITE_ERROR;
    };

    let data: &[u8] = if data.is_null() || length == 0 {
        &[]
    } else {
        slice::from_raw_parts(data, length as usize)
    };

    match writer.write_all(data) {
        Ok(()) => ffi::STATUS_SUCCESS,
        Err(e) => {
            *io_error = Some(e);
            ffi::STATUS_WRITE_ERROR
        }
    }
}

/// A cairo XML device that serializes drawing operations into `W`.
pub struct XmlDevice<W: Write> {
    device: *mut ffi::cairo_device_t,
    sink: *mut RefCell<Sink<W>>,
}

impl<W: Write> XmlDevice<W> {
    /// Creates a device that will write its trace into `writer`.
    ///
    /// cairo writes nothing until a surface is created on the device and drawn to.
    pub fn for_stream(writer: W) -> Result<Self, cairo::Error> {
        let sink = Box::into_raw(Box::new(RefCell::new(Sink {
            writer: Some(writer),
            io_error: None,
        })));

        let device =
            unsafe { cairo_xml_create_for_stream(Some(write_callback::<W>), sink.cast()) };

        // Even on error cairo returns a device object; it is an inert one that
        // must still be destroyed.
        let device = XmlDevice { device, sink };

        let status = unsafe { ffi::cairo_device_status(device.device) };
        if status != ffi::STATUS_SUCCESS {
            return Err(cairo::Error::from(status));
        }

        Ok(device)
    }

    /// Creates an XML surface of the given size that records into this device.
    pub fn create_surface(
        &self,
        content: cairo::Content,
        width: f64,
        height: f64,
    ) -> Result<XmlSurface<'_>, cairo::Error> {
        let surface = unsafe {
            cairo::Surface::from_raw_full(cairo_xml_surface_create(
                self.device,
                content.into(),
                width,
                height,
            ))?
        };

        Ok(XmlSurface {
            surface,
            _device: PhantomData,
        })
    }

    /// Finishes the device and returns the stream it was writing to.
    ///
    /// If writing to the stream failed at any point, that first error is returned
    /// instead, and the stream is dropped.
    pub fn finish(mut self) -> io::Result<W> {
        self.release_device();

        let sink = self.take_sink();
        let Sink { writer, io_error } = sink.into_inner();

        if let Some(e) = io_error {
            return Err(e);
        }

        writer.ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace stream is gone"))
    }

    fn release_device(&mut self) {
        if !self.device.is_null() {
            unsafe {
                ffi::cairo_device_finish(self.device);
                ffi::cairo_device_destroy(self.device);
            }
            self.device = ptr::null_mut();
        }
    }

    // Must only be called after release_device(), since cairo may call back into
    // the sink until the device is finished.
    fn take_sink(&mut self) -> Box<RefCell<Sink<W>>> {
        debug_assert!(self.device.is_null());
        debug_assert!(!self.sink.is_null());

        let sink = unsafe { Box::from_raw(self.sink) };
        self.sink = ptr::null_mut();
        sink
    }
}

impl<W: Write> Drop for XmlDevice<W> {
    fn drop(&mut self) {
        self.release_device();

        if !self.sink.is_null() {
            drop(self.take_sink());
        }
    }
}

/// An XML surface bound to an [`XmlDevice`].
///
/// Dropping the surface finishes it, which makes cairo emit everything that was
/// recorded on it.
pub struct XmlSurface<'a> {
    surface: cairo::Surface,
    _device: PhantomData<&'a ()>,
}

impl XmlSurface<'_> {
    /// Finishes the surface and reports its final status.
    pub fn finish(self) -> Result<(), cairo::Error> {
        self.surface.finish();
        self.surface.status()
    }
}

impl Deref for XmlSurface<'_> {
    type Target = cairo::Surface;

    fn deref(&self) -> &cairo::Surface {
        &self.surface
    }
}

impl AsRef<cairo::Surface> for XmlSurface<'_> {
    fn as_ref(&self) -> &cairo::Surface {
        self
    }
}

impl Drop for XmlSurface<'_> {
    fn drop(&mut self) {
        self.surface.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "broken pipe dream"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn draw_square(surface: &XmlSurface<'_>) -> Result<(), cairo::Error> {
        let cr = cairo::Context::new(surface)?;
        cr.set_source_rgb(1.0, 0.0, 0.0);
        cr.rectangle(10.0, 10.0, 50.0, 50.0);
        cr.fill()
    }

    #[test]
    fn gives_back_the_stream() {
        let device = XmlDevice::for_stream(b"<image>\n".to_vec()).unwrap();
        let output = device.finish().unwrap();

        assert!(output.starts_with(b"<image>\n"));
    }

    #[test]
    fn records_drawing_operations() {
        let device = XmlDevice::for_stream(Vec::new()).unwrap();

        {
            let surface = device
                .create_surface(cairo::Content::ColorAlpha, 100.0, 100.0)
                .unwrap();
            draw_square(&surface).unwrap();
            surface.finish().unwrap();
        }

        let output = String::from_utf8(device.finish().unwrap()).unwrap();
        assert!(output.contains("<fill"));
    }

    #[test]
    fn same_drawing_gives_same_trace() {
        let trace = || {
            let device = XmlDevice::for_stream(Vec::new()).unwrap();
            {
                let surface = device
                    .create_surface(cairo::Content::ColorAlpha, 100.0, 100.0)
                    .unwrap();
                draw_square(&surface).unwrap();
            }
            device.finish().unwrap()
        };

        assert_eq!(trace(), trace());
    }

    #[test]
    fn reports_write_errors() {
        let device = XmlDevice::for_stream(BrokenWriter).unwrap();

        // cairo itself notices the failure too, so drawing may fail at any step
        if let Ok(surface) = device.create_surface(cairo::Content::ColorAlpha, 100.0, 100.0) {
            let _ = draw_square(&surface);
        }

        let err = device.finish().err().unwrap();
        assert_eq!(err.to_string(), "broken pipe dream");
    }

    #[test]
    fn dropping_an_unfinished_device_is_fine() {
        let device = XmlDevice::for_stream(Vec::new()).unwrap();
        let surface = device
            .create_surface(cairo::Content::ColorAlpha, 10.0, 10.0)
            .unwrap();
        draw_square(&surface).unwrap();
        drop(surface);
        drop(device);
    }
}
