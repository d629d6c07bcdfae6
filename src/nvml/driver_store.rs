//! DriverStore lookup for `nvml.dll` (Windows only)
//!
//! The OpenGL driver registered for each display adapter sits next to the
//! `nvml.dll` that matches the installed driver. Find it through the
//! configuration manager and the adapter's software registry key, put its
//! directory first on the DLL search path, and load the library.

use crate::error::LoadError;
use crate::nvml::loader::{
    driver_directory, open_and_resolve, split_multi_sz, NvmlLibrary, LIBRARY_NAME,
};

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows::core::{w, PCWSTR};
use windows::Win32::Devices::DeviceAndDriverInstallation::{
    CM_Get_Device_ID_ListW, CM_Get_Device_ID_List_SizeW, CM_Locate_DevNodeW, CM_Open_DevNode_Key,
    RegDisposition_OpenExisting, CM_GETIDLIST_FILTER_CLASS, CM_GETIDLIST_FILTER_PRESENT,
    CM_LOCATE_DEVNODE_NORMAL, CM_REGISTRY_SOFTWARE, CR_SUCCESS,
};
use windows::Win32::Foundation::ERROR_SUCCESS;
use windows::Win32::System::LibraryLoader::{GetDllDirectoryW, SetDllDirectoryW};
use windows::Win32::System::Registry::{RegCloseKey, RegQueryValueExW, HKEY, KEY_QUERY_VALUE};

/// Setup class of display adapters
const DISPLAY_CLASS_GUID: PCWSTR = w!("{4d36e968-e325-11ce-bfc1-08002be10318}");

/// Registry value holding the OpenGL driver path
const DRIVER_NAME_VALUE: PCWSTR = w!("OpenGLDriverName");

/// Find the DriverStore copy of NVML, load it and resolve its imports
///
/// The DLL search path is restored before returning, whatever the outcome.
pub fn load_imports() -> Result<NvmlLibrary, LoadError> {
    let directory = find_driver_store_directory()?.filter(|dir| !dir.is_empty());

    let _guard = match &directory {
        Some(dir) => Some(SearchPathGuard::prepend(dir)?),
        None => {
            log::debug!("No DriverStore directory found; using the standard DLL search order");
            None
        }
    };

    let library = open_and_resolve(OsStr::new(LIBRARY_NAME))?;
    let path = directory.map(|dir| Path::new(&dir).join(LIBRARY_NAME).into_os_string());

    Ok(NvmlLibrary::resident(path, library))
}

/// Directory of the first display adapter's OpenGL driver
fn find_driver_store_directory() -> Result<Option<String>, LoadError> {
    for device_id in display_device_ids()? {
        let Some(driver_path) = opengl_driver_name(&device_id) else {
            log::debug!("{}: no OpenGL driver registered", device_id);
            continue;
        };

        match driver_directory(&driver_path) {
            Some(dir) => {
                log::debug!("{}: DriverStore directory {}", device_id, dir);
                return Ok(Some(dir.to_string()));
            }
            None => log::debug!("{}: '{}' has no directory part", device_id, driver_path),
        }
    }

    Ok(None)
}

/// Instance ids of present display adapters
fn display_device_ids() -> Result<Vec<String>, LoadError> {
    let flags = CM_GETIDLIST_FILTER_CLASS | CM_GETIDLIST_FILTER_PRESENT;

    let mut len = 0u32;
    // SAFETY: `len` is a valid out pointer and the filter is NUL-terminated
    let cr = unsafe { CM_Get_Device_ID_List_SizeW(&mut len, DISPLAY_CLASS_GUID, flags) };
    if cr != CR_SUCCESS {
        return Err(LoadError::DeviceList(cr.0));
    }

    let mut buffer = vec![0u16; len as usize];
    // SAFETY: the buffer is sized from the call above
    let cr = unsafe { CM_Get_Device_ID_ListW(DISPLAY_CLASS_GUID, &mut buffer, flags) };
    if cr != CR_SUCCESS {
        return Err(LoadError::DeviceList(cr.0));
    }

    Ok(split_multi_sz(&buffer))
}

/// `OpenGLDriverName` from a device's software key
///
/// Any failure along the way yields `None` so the caller moves on to the
/// next adapter.
fn opengl_driver_name(device_id: &str) -> Option<String> {
    let id = to_wide(OsStr::new(device_id));

    let mut devinst = 0u32;
    // SAFETY: `id` is NUL-terminated and outlives the call
    let cr = unsafe { CM_Locate_DevNodeW(&mut devinst, PCWSTR(id.as_ptr()), CM_LOCATE_DEVNODE_NORMAL) };
    if cr != CR_SUCCESS {
        return None;
    }

    let mut hkey = HKEY::default();
    // SAFETY: `hkey` is a valid out pointer; on success it is closed by RegistryKey
    let cr = unsafe {
        CM_Open_DevNode_Key(
            devinst,
            KEY_QUERY_VALUE.0,
            0,
            RegDisposition_OpenExisting,
            &mut hkey,
            CM_REGISTRY_SOFTWARE,
        )
    };
    if cr != CR_SUCCESS {
        return None;
    }

    RegistryKey(hkey).query_string(DRIVER_NAME_VALUE)
}

/// Open registry key, closed on drop
struct RegistryKey(HKEY);

impl RegistryKey {
    /// First string of a `REG_SZ` or `REG_MULTI_SZ` value
    fn query_string(&self, name: PCWSTR) -> Option<String> {
        let mut size = 0u32;
        // SAFETY: querying the size only
        let status = unsafe { RegQueryValueExW(self.0, name, None, None, None, Some(&mut size)) };
        if status != ERROR_SUCCESS {
            return None;
        }

        let mut data = vec![0u8; size as usize];
        // SAFETY: `data` holds `size` bytes
        let status = unsafe {
            RegQueryValueExW(
                self.0,
                name,
                None,
                None,
                Some(data.as_mut_ptr()),
                Some(&mut size),
            )
        };
        if status != ERROR_SUCCESS {
            return None;
        }

        let wide: Vec<u16> = data[..size as usize]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        split_multi_sz(&wide).into_iter().next()
    }
}

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: the key was opened by CM_Open_DevNode_Key and is closed once
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Prepends a directory to the DLL search path until dropped
struct SearchPathGuard {
    prior: Option<Vec<u16>>,
}

impl SearchPathGuard {
    fn prepend(dir: &str) -> Result<Self, LoadError> {
        let prior = current_dll_directory();
        let wide = to_wide(OsStr::new(dir));

        // SAFETY: `wide` is NUL-terminated and outlives the call
        unsafe { SetDllDirectoryW(PCWSTR(wide.as_ptr())) }.map_err(|e| {
            LoadError::SearchPath {
                path: dir.to_string(),
                message: e.to_string(),
            }
        })?;

        log::debug!("Added {} to the DLL search path", dir);
        Ok(Self { prior })
    }
}

impl Drop for SearchPathGuard {
    fn drop(&mut self) {
        let restored = match &self.prior {
            // SAFETY: `prior` is NUL-terminated
            Some(prior) => unsafe { SetDllDirectoryW(PCWSTR(prior.as_ptr())) },
            // SAFETY: a null path restores the default search order
            None => unsafe { SetDllDirectoryW(PCWSTR::null()) },
        };

        if let Err(e) = restored {
            log::warn!("Failed to restore the DLL search path: {}", e);
        }
    }
}

/// The directory set by a previous `SetDllDirectoryW`, NUL-terminated
fn current_dll_directory() -> Option<Vec<u16>> {
    // SAFETY: a missing buffer asks for the required length
    let needed = unsafe { GetDllDirectoryW(None) };
    if needed <= 1 {
        return None;
    }

    let mut buffer = vec![0u16; needed as usize];
    // SAFETY: the buffer holds `needed` characters
    let written = unsafe { GetDllDirectoryW(Some(&mut buffer)) } as usize;
    if written == 0 || written >= buffer.len() {
        return None;
    }

    buffer.truncate(written + 1);
    Some(buffer)
}

fn to_wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}
