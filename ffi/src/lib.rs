//! C-ABI wrapper around `form-body-core`.
//!
//! # Overview
//! Exposes form request building through `extern "C"` functions so any
//! language with a C FFI can assemble URL-encoded or multipart bodies and
//! receive a ready-to-send request as plain data.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The opaque `FfiFormRequest` records fields in call order; each
//!   `form_build_request` replays them into a fresh `MultipartBody` over a
//!   clone of the request, so a handle can be built any number of times.
//! - Null values for fields and files are silently ignored, like `None` in
//!   the core API. A null handle or name is an error.
//! - The C caller owns all returned pointers and must call the matching
//!   `form_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use form_body_core::{FieldValue, FileRef, HttpRequest};

use types::*;

/// Borrow a C string argument. Null maps to `None`; invalid UTF-8 is an error.
fn str_arg<'a>(ptr: *const c_char) -> Result<Option<&'a str>, FfiErrorCode> {
    if ptr.is_null() {
        return Ok(None);
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(Some)
        .map_err(|_| FfiErrorCode::InvalidArgument)
}

/// Shared body of `form_add_field` / `form_add_file`.
fn add_value(
    handle: *mut FfiFormRequest,
    name: *const c_char,
    value: *const c_char,
    make: fn(&str) -> FieldValue,
) -> FfiErrorCode {
    if handle.is_null() || name.is_null() {
        return FfiErrorCode::NullArg;
    }
    let handle = unsafe { &mut *handle };
    let name = match str_arg(name) {
        Ok(Some(name)) => name,
        Ok(None) => return FfiErrorCode::NullArg,
        Err(code) => return code,
    };
    match str_arg(value) {
        Ok(Some(value)) => {
            handle.fields.push((name.to_string(), make(value)));
            FfiErrorCode::Ok
        }
        Ok(None) => FfiErrorCode::Ok,
        Err(code) => code,
    }
}

// ---------------------------------------------------------------------------
// Handle lifecycle
// ---------------------------------------------------------------------------

/// Create a new form request for `method` and `url`.
///
/// Returns null if `url` is null or not valid UTF-8.
/// The caller must free the returned pointer with `form_request_free`.
#[unsafe(no_mangle)]
pub extern "C" fn form_request_new(method: FfiHttpMethod, url: *const c_char) -> *mut FfiFormRequest {
    catch_unwind(|| {
        let url = match str_arg(url) {
            Ok(Some(url)) => url,
            _ => return std::ptr::null_mut(),
        };
        Box::into_raw(Box::new(FfiFormRequest {
            request: HttpRequest::new(method.into(), url),
            fields: Vec::new(),
            boundary: None,
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a handle created by `form_request_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn form_request_free(handle: *mut FfiFormRequest) {
    if !handle.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(handle) });
        });
    }
}

// ---------------------------------------------------------------------------
// Field accumulation
// ---------------------------------------------------------------------------

/// Add a text field. A null `value` is ignored and returns `Ok`.
#[unsafe(no_mangle)]
pub extern "C" fn form_add_field(
    handle: *mut FfiFormRequest,
    name: *const c_char,
    value: *const c_char,
) -> FfiErrorCode {
    catch_unwind(|| add_value(handle, name, value, |v| FieldValue::Text(v.to_string())))
        .unwrap_or(FfiErrorCode::Panic)
}

/// Add a file field read from `path` at build time. A null `path` is ignored
/// and returns `Ok`.
#[unsafe(no_mangle)]
pub extern "C" fn form_add_file(
    handle: *mut FfiFormRequest,
    name: *const c_char,
    path: *const c_char,
) -> FfiErrorCode {
    catch_unwind(|| add_value(handle, name, path, |p| FieldValue::File(FileRef::new(p))))
        .unwrap_or(FfiErrorCode::Panic)
}

/// Set basic-auth credentials on the request.
#[unsafe(no_mangle)]
pub extern "C" fn form_basic_auth(
    handle: *mut FfiFormRequest,
    username: *const c_char,
    password: *const c_char,
) -> FfiErrorCode {
    catch_unwind(|| {
        if handle.is_null() {
            return FfiErrorCode::NullArg;
        }
        let handle = unsafe { &mut *handle };
        match (str_arg(username), str_arg(password)) {
            (Ok(Some(username)), Ok(Some(password))) => {
                handle.request.basic_auth(username, password);
                FfiErrorCode::Ok
            }
            (Err(code), _) | (_, Err(code)) => code,
            _ => FfiErrorCode::NullArg,
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

/// Use a fixed multipart boundary. Validated when the request is built.
#[unsafe(no_mangle)]
pub extern "C" fn form_set_boundary(
    handle: *mut FfiFormRequest,
    boundary: *const c_char,
) -> FfiErrorCode {
    catch_unwind(|| {
        if handle.is_null() {
            return FfiErrorCode::NullArg;
        }
        let handle = unsafe { &mut *handle };
        match str_arg(boundary) {
            Ok(Some(boundary)) => {
                handle.boundary = Some(boundary.to_string());
                FfiErrorCode::Ok
            }
            Ok(None) => FfiErrorCode::NullArg,
            Err(code) => code,
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Build the request: serialize the fields and attach the body and
/// `content-type` header.
///
/// The caller must free the returned pointer with `form_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn form_build_request(handle: *const FfiFormRequest) -> *mut FfiFormResult {
    catch_unwind(|| {
        if handle.is_null() {
            return FfiFormResult::null_arg("handle");
        }
        let handle = unsafe { &*handle };
        let mut request = handle.request.clone();

        let mut body = request.multipart();
        for (name, value) in &handle.fields {
            body = match value {
                FieldValue::Text(text) => body.field(name, text),
                FieldValue::File(file) => body.file(name, file.path()),
            };
        }
        if let Some(boundary) = &handle.boundary {
            body = body.boundary(boundary.as_str());
        }

        match body.attach() {
            Ok(()) => FfiFormResult::ok(request),
            Err(e) => FfiFormResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiFormResult::panic("panic in form_build_request"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn form_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.body, req.body_len))
            });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiFormResult` and the request or message it carries. Safe to
/// call with null.
#[unsafe(no_mangle)]
pub extern "C" fn form_free_result(result: *mut FfiFormResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        form_free_request(result.request);
    });
}

/// Free a string returned by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn form_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}
