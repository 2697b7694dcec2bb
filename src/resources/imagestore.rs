//! Asynchronous image loading.
//!
//! [`ImageStore::load`] hands out an [`ImageHandle`] immediately; the bytes
//! are read on a background loader thread and delivered back through a
//! crossbeam channel. The host drains finished reads once per frame with
//! [`ImageStore::drain_loaded`], uploads them to its graphics backend and
//! reports the decoded size with [`ImageStore::mark_ready`].
//!
//! Until then the handle is [`ImageState::Loading`]: [`ImageStore::size`]
//! returns `None` and drawing the handle is a no-op.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crate::math::Vector2;

/// Opaque reference to an image owned by the [`ImageStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImageHandle(u32);

impl ImageHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageState {
    Loading,
    Ready { width: u32, height: u32 },
    Failed,
}

#[derive(Debug)]
struct ImageEntry {
    path: String,
    state: ImageState,
}

/// Raw file contents delivered by the loader thread.
#[derive(Debug)]
pub struct LoadedImage {
    pub handle: ImageHandle,
    pub path: String,
    pub bytes: Vec<u8>,
}

enum LoaderCmd {
    Load { handle: ImageHandle, path: PathBuf },
    Shutdown,
}

enum LoaderMsg {
    Loaded { handle: ImageHandle, bytes: Vec<u8> },
    Failed { handle: ImageHandle, error: String },
}

struct LoaderBridge {
    tx_cmd: Sender<LoaderCmd>,
    rx_msg: Receiver<LoaderMsg>,
    handle: JoinHandle<()>,
}

#[derive(Resource)]
pub struct ImageStore {
    root: PathBuf,
    next: u32,
    entries: FxHashMap<ImageHandle, ImageEntry>,
    by_path: FxHashMap<String, ImageHandle>,
    loader: Option<LoaderBridge>,
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new("")
    }
}

impl ImageStore {
    /// Store without a loader thread. Handles stay `Loading` until the owner
    /// calls [`mark_ready`](Self::mark_ready) or [`mark_failed`](Self::mark_failed).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next: 0,
            entries: FxHashMap::default(),
            by_path: FxHashMap::default(),
            loader: None,
        }
    }

    /// Store backed by a background thread that reads files under `root`.
    pub fn with_loader_thread(root: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(root);
        store.start_loader(None);
        store
    }

    /// Start the loader thread on an existing store, optionally moving its
    /// asset root first. Handles still `Loading` are requested again, so
    /// images asked for before the loader existed are not lost. A running
    /// loader is stopped and replaced.
    pub fn start_loader(&mut self, root: Option<&Path>) {
        self.shutdown();
        if let Some(root) = root {
            self.root = root.to_path_buf();
        }
        let (tx_cmd, rx_cmd) = unbounded::<LoaderCmd>();
        let (tx_msg, rx_msg) = unbounded::<LoaderMsg>();
        let handle = std::thread::spawn(move || loader_thread(rx_cmd, tx_msg));

        let mut pending: Vec<(ImageHandle, &ImageEntry)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.state == ImageState::Loading)
            .map(|(h, e)| (*h, e))
            .collect();
        pending.sort_by_key(|(h, _)| *h);
        for (handle, entry) in pending {
            let path = self.root.join(&entry.path);
            if tx_cmd.send(LoaderCmd::Load { handle, path }).is_err() {
                log::warn!("image loader is gone, <{}> will never load", entry.path);
            }
        }
        log::debug!("image loader started under {:?}", self.root);

        self.loader = Some(LoaderBridge {
            tx_cmd,
            rx_msg,
            handle,
        });
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Request an image by path relative to the asset root. Repeated requests
    /// for the same path share one handle.
    pub fn load(&mut self, path: &str) -> ImageHandle {
        if let Some(handle) = self.by_path.get(path) {
            return *handle;
        }
        let handle = ImageHandle(self.next);
        self.next += 1;
        self.entries.insert(
            handle,
            ImageEntry {
                path: path.to_owned(),
                state: ImageState::Loading,
            },
        );
        self.by_path.insert(path.to_owned(), handle);

        if let Some(loader) = &self.loader {
            let full = self.root.join(path);
            if loader
                .tx_cmd
                .send(LoaderCmd::Load { handle, path: full })
                .is_err()
            {
                log::warn!("image loader is gone, <{path}> will never load");
            }
        }
        log::debug!("requested image <{path}> as {handle:?}");
        handle
    }

    pub fn state(&self, handle: ImageHandle) -> Option<ImageState> {
        self.entries.get(&handle).map(|e| e.state)
    }

    pub fn path(&self, handle: ImageHandle) -> Option<&str> {
        self.entries.get(&handle).map(|e| e.path.as_str())
    }

    pub fn is_ready(&self, handle: ImageHandle) -> bool {
        matches!(self.state(handle), Some(ImageState::Ready { .. }))
    }

    /// Pixel size of a ready image.
    pub fn size(&self, handle: ImageHandle) -> Option<Vector2> {
        match self.state(handle)? {
            ImageState::Ready { width, height } => Some(Vector2::new(width as f32, height as f32)),
            _ => None,
        }
    }

    pub fn mark_ready(&mut self, handle: ImageHandle, width: u32, height: u32) {
        if let Some(entry) = self.entries.get_mut(&handle) {
            entry.state = ImageState::Ready { width, height };
            log::debug!("image <{}> ready ({width}x{height})", entry.path);
        }
    }

    pub fn mark_failed(&mut self, handle: ImageHandle) {
        if let Some(entry) = self.entries.get_mut(&handle) {
            entry.state = ImageState::Failed;
            log::warn!("image <{}> failed to load", entry.path);
        }
    }

    /// Non-blocking drain of reads finished by the loader thread. Read
    /// failures are marked failed here and not returned.
    pub fn drain_loaded(&mut self) -> Vec<LoadedImage> {
        let Some(loader) = &self.loader else {
            return Vec::new();
        };
        let messages: Vec<LoaderMsg> = loader.rx_msg.try_iter().collect();
        let mut loaded = Vec::new();
        for msg in messages {
            match msg {
                LoaderMsg::Loaded { handle, bytes } => {
                    let path = self.path(handle).unwrap_or_default().to_owned();
                    loaded.push(LoadedImage {
                        handle,
                        path,
                        bytes,
                    });
                }
                LoaderMsg::Failed { handle, error } => {
                    log::warn!("image read error: {error}");
                    self.mark_failed(handle);
                }
            }
        }
        loaded
    }

    /// Stop the loader thread and wait for it.
    pub fn shutdown(&mut self) {
        if let Some(loader) = self.loader.take() {
            let _ = loader.tx_cmd.send(LoaderCmd::Shutdown);
            let _ = loader.handle.join();
            log::debug!("image loader stopped");
        }
    }
}

impl Drop for ImageStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Entry point of the loader thread. Blocks on the command channel until
/// [`LoaderCmd::Shutdown`] or until the store is dropped.
fn loader_thread(rx_cmd: Receiver<LoaderCmd>, tx_msg: Sender<LoaderMsg>) {
    for cmd in rx_cmd.iter() {
        match cmd {
            LoaderCmd::Load { handle, path } => {
                let msg = match std::fs::read(&path) {
                    Ok(bytes) => LoaderMsg::Loaded { handle, bytes },
                    Err(e) => LoaderMsg::Failed {
                        handle,
                        error: format!("{}: {e}", path.display()),
                    },
                };
                if tx_msg.send(msg).is_err() {
                    break;
                }
            }
            LoaderCmd::Shutdown => break,
        }
    }
}

/// Width and height from a PNG header, for hosts that never decode pixels.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    if bytes.len() < 24 || bytes[..8] != SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn load_dedupes_by_path() {
        let mut store = ImageStore::new("assets");
        let a = store.load("knight.png");
        let b = store.load("knight.png");
        let c = store.load("barrel.png");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.path(c), Some("barrel.png"));
    }

    #[test]
    fn handle_is_unready_until_marked() {
        let mut store = ImageStore::new("");
        let h = store.load("x.png");
        assert_eq!(store.state(h), Some(ImageState::Loading));
        assert_eq!(store.size(h), None);
        store.mark_ready(h, 64, 16);
        assert!(store.is_ready(h));
        assert_eq!(store.size(h), Some(Vector2::new(64.0, 16.0)));
    }

    #[test]
    fn png_header_dimensions() {
        let mut header = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 13];
        header.extend_from_slice(b"IHDR");
        header.extend_from_slice(&96u32.to_be_bytes());
        header.extend_from_slice(&32u32.to_be_bytes());
        assert_eq!(png_dimensions(&header), Some((96, 32)));
        assert_eq!(png_dimensions(b"not a png"), None);
    }

    #[test]
    fn loader_thread_reports_missing_file_as_failed() {
        let mut store = ImageStore::with_loader_thread("/nonexistent-asset-root");
        let h = store.load("missing.png");
        let deadline = Instant::now() + Duration::from_secs(5);
        while store.state(h) == Some(ImageState::Loading) && Instant::now() < deadline {
            assert!(store.drain_loaded().is_empty());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(store.state(h), Some(ImageState::Failed));
        store.shutdown();
    }

    #[test]
    fn start_loader_requests_images_asked_for_earlier() {
        let dir = std::env::temp_dir().join(format!("scenekit2d-img-{}", fastrand::u64(..)));
        std::fs::create_dir_all(&dir).expect("temp dir");
        std::fs::write(dir.join("early.bin"), [7u8, 8]).expect("write");

        let mut store = ImageStore::new("");
        let h = store.load("early.bin");
        store.start_loader(Some(dir.as_path()));
        assert_eq!(store.root(), dir.as_path());

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut loaded = Vec::new();
        while loaded.is_empty() && Instant::now() < deadline {
            loaded = store.drain_loaded();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].handle, h);
        assert_eq!(loaded[0].bytes, vec![7, 8]);
        store.shutdown();
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn loader_thread_delivers_bytes() {
        let dir = std::env::temp_dir().join(format!("scenekit2d-img-{}", fastrand::u64(..)));
        std::fs::create_dir_all(&dir).expect("temp dir");
        std::fs::write(dir.join("a.bin"), [1u8, 2, 3]).expect("write");

        let mut store = ImageStore::with_loader_thread(&dir);
        let h = store.load("a.bin");
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut loaded = Vec::new();
        while loaded.is_empty() && Instant::now() < deadline {
            loaded = store.drain_loaded();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].handle, h);
        assert_eq!(loaded[0].bytes, vec![1, 2, 3]);
        store.shutdown();
        let _ = std::fs::remove_dir_all(&dir);
    }
}
