//! Reading data frames from `.itf` files
//!
//! The whole frame-aligned region is read in one pass, memory-mapped when
//! the `mmap` feature is enabled and otherwise copied into a single buffer.

use crate::error::{Error, Result};
use crate::options::DecodeOptions;
use itf_core::format::constants::FRAME_SIZE;
use itf_core::validation::{
    frame_count, frame_region, frame_windows, locate_first_frame, locate_first_valid_frame,
    BadFrameTally,
};
use itf_core::{Frame, ItfError};
#[cfg(feature = "mmap")]
use memmap2::{Mmap, MmapOptions};
use std::{
    fs::File,
    io::{Read, Seek, SeekFrom},
    path::Path,
};
use tracing::{debug, info, warn};

/// Bytes read ahead to find the first frame; strict alignment needs a
/// whole frame after the last candidate
const ALIGNMENT_HEAD: usize = 2 * FRAME_SIZE;

/// Frames read from a recording
#[derive(Debug, Clone)]
pub struct FrameSet {
    /// Every frame in file order, including ones that failed the marker check
    pub frames: Vec<Frame>,
    /// Indices of frames that failed the marker check
    pub bad_frames: Vec<usize>,
    /// Garbage bytes skipped before the first frame
    pub skipped_bytes: usize,
    /// Partial-frame bytes ignored at the end of the file
    pub trailing_bytes: usize,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn bad_frame_count(&self) -> usize {
        self.bad_frames.len()
    }
}

/// Frame-aligned bytes of a recording
enum RecordingBytes {
    #[cfg(feature = "mmap")]
    Mapped { map: Mmap, start: usize, end: usize },
    #[cfg_attr(feature = "mmap", allow(dead_code))]
    Buffered(Vec<u8>),
}

impl RecordingBytes {
    fn as_slice(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            RecordingBytes::Mapped { map, start, end } => &map[*start..*end],
            RecordingBytes::Buffered(bytes) => bytes,
        }
    }
}

/// Alignment of the frame region within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Alignment {
    offset: usize,
    frames: usize,
    trailing: usize,
}

impl Alignment {
    fn find(head: &[u8], file_len: usize, strict: bool) -> Result<Self> {
        let offset = if strict {
            locate_first_valid_frame(head)?
        } else {
            locate_first_frame(head)?
        };
        let aligned_len = file_len - offset;
        let frames = frame_count(aligned_len)?;
        Ok(Self {
            offset,
            frames,
            trailing: aligned_len - frames * FRAME_SIZE,
        })
    }
}

/// Read, decode and check every frame of an `.itf` file
///
/// Frames failing the marker check are kept and counted; the read fails once
/// more than `options.bad_frame_limit` frames are bad.
pub fn read_frames<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<FrameSet> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let byte_len = file.metadata().map_err(|e| Error::io(path, e))?.len();
    let file_len = usize::try_from(byte_len)
        .map_err(|_| Error::AllocationFailure { bytes: byte_len })?;
    debug!("File size is {file_len} bytes");

    let (bytes, alignment) = load_region(&mut file, path, file_len, options.strict_alignment)?;
    if alignment.offset > 0 {
        info!("Skipping {} bytes to first frame", alignment.offset);
    }
    if alignment.trailing > 0 {
        debug!("Ignoring {} trailing bytes", alignment.trailing);
    }
    debug!("Read of {} bytes complete", bytes.as_slice().len());

    let (frames, bad_frames) = decode_frames(bytes.as_slice(), options.bad_frame_limit)?;
    debug!(
        "Checked {} data frames, {} bad",
        frames.len(),
        bad_frames.len()
    );

    Ok(FrameSet {
        frames,
        bad_frames,
        skipped_bytes: alignment.offset,
        trailing_bytes: alignment.trailing,
    })
}

/// Decode every frame of a frame-aligned region
///
/// Returns the frames and the indices of those that failed the marker check.
pub fn decode_frames(region: &[u8], bad_frame_limit: usize) -> Result<(Vec<Frame>, Vec<usize>)> {
    let windows = frame_windows(region)?;
    let mut frames = Vec::new();
    frames
        .try_reserve_exact(windows.len())
        .map_err(|_| Error::AllocationFailure {
            bytes: (windows.len() * std::mem::size_of::<Frame>()) as u64,
        })?;

    let mut tally = BadFrameTally::new(bad_frame_limit);
    let mut bad_frames = Vec::new();
    for (index, window) in windows.iter().enumerate() {
        let frame = Frame::decode(window)?;
        if let Some(packet) = frame.first_bad_marker() {
            warn!("Data frame {index} failed packet {packet} check");
            bad_frames.push(index);
        }
        tally
            .record(frame.validate())
            .map_err(|_| Error::TooManyBadFrames {
                bad: tally.count(),
                limit: tally.limit(),
            })?;
        frames.push(frame);
    }

    Ok((frames, bad_frames))
}

#[cfg(feature = "mmap")]
fn load_region(
    file: &mut File,
    path: &Path,
    file_len: usize,
    strict: bool,
) -> Result<(RecordingBytes, Alignment)> {
    if file_len == 0 {
        return Err(ItfError::NoFrameStart.into());
    }

    // SAFETY: Read-only mapping; the recording is not modified while mapped
    let map = unsafe { MmapOptions::new().map(&*file).map_err(|e| Error::io(path, e))? };
    let head = &map[..map.len().min(ALIGNMENT_HEAD)];
    let alignment = Alignment::find(head, map.len(), strict)?;
    let (start, end) = frame_region(alignment.offset, alignment.frames)?;

    Ok((RecordingBytes::Mapped { map, start, end }, alignment))
}

#[cfg(not(feature = "mmap"))]
fn load_region(
    file: &mut File,
    path: &Path,
    file_len: usize,
    strict: bool,
) -> Result<(RecordingBytes, Alignment)> {
    let mut head = Vec::with_capacity(ALIGNMENT_HEAD);
    (&mut *file)
        .take(ALIGNMENT_HEAD as u64)
        .read_to_end(&mut head)
        .map_err(|e| Error::io(path, e))?;
    let alignment = Alignment::find(&head, file_len, strict)?;
    let bytes = read_exact_region(file, path, alignment)?;
    Ok((RecordingBytes::Buffered(bytes), alignment))
}

/// Copy the frame region into one buffer
#[cfg_attr(feature = "mmap", allow(dead_code))]
fn read_exact_region(file: &mut File, path: &Path, alignment: Alignment) -> Result<Vec<u8>> {
    let (start, end) = frame_region(alignment.offset, alignment.frames)?;
    let expected = end - start;

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(expected)
        .map_err(|_| Error::AllocationFailure {
            bytes: expected as u64,
        })?;

    file.seek(SeekFrom::Start(start as u64))
        .map_err(|e| Error::io(path, e))?;
    file.take(expected as u64)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(path, e))?;

    if bytes.len() < expected {
        return Err(Error::ShortRead {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_bytes(count: usize) -> Vec<u8> {
        (0..count)
            .flat_map(|record| Frame::blank(record as u8).to_bytes())
            .collect()
    }

    #[test]
    fn test_alignment_counts_whole_frames() {
        let mut bytes = vec![0u8; 13];
        bytes.extend(frame_bytes(2));
        bytes.extend([1, 2, 3]);
        let alignment = Alignment::find(&bytes[..ALIGNMENT_HEAD], bytes.len(), false).unwrap();
        assert_eq!(
            alignment,
            Alignment {
                offset: 13,
                frames: 2,
                trailing: 3
            }
        );
    }

    #[test]
    fn test_alignment_needs_one_frame() {
        let mut bytes = vec![b'1'];
        bytes.extend([0u8; 100]);
        let result = Alignment::find(&bytes, bytes.len(), false);
        assert!(matches!(result, Err(Error::Format(ItfError::TruncatedFile))));
    }

    #[test]
    fn test_decode_frames_keeps_bad_frames() {
        let mut bytes = frame_bytes(3);
        bytes[FRAME_SIZE + 186] = b'0';
        let (frames, bad) = decode_frames(&bytes, 1000).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(bad, vec![1]);
        assert!(!frames[1].validate());
    }

    #[test]
    fn test_decode_frames_limit() {
        let mut bytes = frame_bytes(4);
        for frame in 0..3 {
            bytes[frame * FRAME_SIZE + 64] = 0;
        }
        let result = decode_frames(&bytes, 2);
        assert!(matches!(
            result,
            Err(Error::TooManyBadFrames { bad: 3, limit: 2 })
        ));
        assert!(decode_frames(&bytes, 3).is_ok());
    }
}
