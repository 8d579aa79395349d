// C ABI for non-Rust hosts. Every engine lives behind an opaque handle owned
// by the caller; nothing here is global. Panics never cross the boundary.
use crate::PinyinSearch;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

/// Borrows a C string, treating null or invalid UTF-8 as empty.
unsafe fn str_arg<'a>(s: *const c_char) -> &'a str {
    if s.is_null() {
        return "";
    }
    CStr::from_ptr(s).to_str().unwrap_or("")
}

fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).map(CString::into_raw).unwrap_or(ptr::null_mut())
}

/// Runs `f`, returning `fallback` if it panics. Needs an unwinding build;
/// the release profile keeps `panic = "unwind"` for this.
fn guarded<T>(fallback: T, f: impl FnOnce() -> T) -> T {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        tracing::error!("panic caught at the C boundary");
        fallback
    })
}

#[no_mangle]
pub extern "C" fn pinyin_search_new() -> *mut PinyinSearch {
    guarded(ptr::null_mut(), || Box::into_raw(Box::new(PinyinSearch::new())))
}

/// # Safety
/// `engine` must come from [`pinyin_search_new`] and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_free(engine: *mut PinyinSearch) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/// Learns `text` and returns its initials, to be released with
/// [`pinyin_search_free_string`]. Null on a null handle.
///
/// # Safety
/// `engine` must be a live handle or null; `text` a NUL-terminated string or null.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_learn(engine: *const PinyinSearch, text: *const c_char) -> *mut c_char {
    let Some(engine) = engine.as_ref() else { return ptr::null_mut() };
    let text = str_arg(text);
    guarded(ptr::null_mut(), || into_c_string(engine.learn(text)))
}

/// A null handle or a panic behaves like "no filter": the text matches.
///
/// # Safety
/// `engine` must be a live handle or null; strings NUL-terminated or null.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_match(
    engine: *const PinyinSearch,
    text: *const c_char,
    query: *const c_char,
) -> bool {
    let Some(engine) = engine.as_ref() else { return true };
    let (text, query) = (str_arg(text), str_arg(query));
    guarded(true, || engine.is_match(text, query))
}

/// Highlighted copy of `text`. A null `class_name` uses the configured class.
///
/// # Safety
/// `engine` must be a live handle or null; strings NUL-terminated or null.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_highlight(
    engine: *const PinyinSearch,
    text: *const c_char,
    query: *const c_char,
    class_name: *const c_char,
) -> *mut c_char {
    let Some(engine) = engine.as_ref() else { return ptr::null_mut() };
    let (text, query) = (str_arg(text), str_arg(query));
    let marked = guarded(text.to_string(), || {
        if class_name.is_null() {
            engine.highlight_default(text, query)
        } else {
            engine.highlight(text, query, str_arg(class_name))
        }
    });
    into_c_string(marked)
}

/// Stats as a JSON object, e.g. `{"cachedChars":2,"indexedWords":1,...}`.
///
/// # Safety
/// `engine` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_stats_json(engine: *const PinyinSearch) -> *mut c_char {
    let Some(engine) = engine.as_ref() else { return ptr::null_mut() };
    let json = serde_json::to_string(&engine.stats()).unwrap_or_else(|_| "{}".to_string());
    into_c_string(json)
}

/// # Safety
/// `engine` must be a live handle or null.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_clear(engine: *const PinyinSearch) {
    if let Some(engine) = engine.as_ref() {
        guarded((), || engine.clear());
    }
}

/// # Safety
/// `s` must come from this library and not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn pinyin_search_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
