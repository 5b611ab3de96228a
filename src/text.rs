//! Line oriented rendering of walker events
//!
//! Containers open a brace and indent their children one level, details
//! decoded from a chunk are indented one level below the chunk line.
use std::io::Write;

use riffavi::codecs::{audio_format_name, codec_name};
use riffavi::headers::{flag_names, MainHeader, StreamHeader, MAIN_FLAGS, STREAM_FLAGS};
use riffavi::index::{IndexHeader, IndexRecord, LEGACY_FLAGS};
use riffavi::report::{Event, ReportSink};

pub struct TextReport<W: Write> {
    out: W,
    indent: usize,
    depth: usize,
    // 16 digit addresses once a segment is based past 0
    wide: bool,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W, indent: usize) -> Self {
        TextReport {
            out,
            indent,
            depth: 0,
            wide: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn address(&self, address: Option<u64>) -> String {
        match (address, self.wide) {
            (Some(a), false) => format!("{:08X}", a),
            (Some(a), true) => format!("{:016X}", a),
            (None, false) => "????????".to_string(),
            (None, true) => "????????????????".to_string(),
        }
    }

    fn line(&mut self, extra: usize, text: &str) -> std::io::Result<()> {
        let pad = (self.depth + extra) * self.indent;
        writeln!(self.out, "{:pad$}{}", "", text, pad = pad)
    }

    fn open(&mut self, text: &str) -> std::io::Result<()> {
        self.line(0, &format!("{} {{", text))?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self, consumed: u64, budget: u64) -> std::io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        if consumed == budget {
            self.line(0, "}")
        } else {
            self.line(0, &format!("}} {} of {} bytes walked", consumed, budget))
        }
    }

    fn details(&mut self, lines: &[String]) -> std::io::Result<()> {
        for l in lines {
            self.line(1, l)?;
        }
        Ok(())
    }

    fn flags(flags: u32, table: &[(u32, &'static str)]) -> String {
        let names = flag_names(flags, table);
        if names.is_empty() {
            format!("{:#010X}", flags)
        } else {
            format!("{:#010X} ({})", flags, names.join(" | "))
        }
    }

    fn main_header(&mut self, h: &MainHeader) -> std::io::Result<()> {
        self.details(&[
            format!("Microseconds per frame: {}", h.micro_sec_per_frame),
            format!("Max bytes per second: {}", h.max_bytes_per_sec),
            format!("Padding granularity: {}", h.padding_granularity),
            format!("Flags: {}", Self::flags(h.flags, MAIN_FLAGS)),
            format!("Total frames: {}", h.total_frames),
            format!("Initial frames: {}", h.initial_frames),
            format!("Streams: {}", h.streams),
            format!("Suggested buffer size: {}", h.suggested_buffer_size),
            format!("Dimensions: {}x{}", h.width, h.height),
        ])
    }

    fn stream_header(&mut self, h: &StreamHeader) -> std::io::Result<()> {
        let mut lines = vec![
            format!("Stream type: {}", h.fcc_type),
            format!("Handler: {} ({})", h.handler, codec_name(h.handler)),
            format!("Flags: {}", Self::flags(h.flags, STREAM_FLAGS)),
            format!("Priority: {}, language: {}", h.priority, h.language),
            format!("Initial frames: {}", h.initial_frames),
            format!("Rate: {}/{}", h.rate, h.scale),
            format!("Start: {}, length: {}", h.start, h.length),
            format!("Suggested buffer size: {}", h.suggested_buffer_size),
            format!("Quality: {}, sample size: {}", h.quality, h.sample_size),
        ];
        if let Some(r) = h.frame {
            lines.push(format!("Frame: ({}, {}) - ({}, {})", r.left, r.top, r.right, r.bottom));
        }
        self.details(&lines)
    }

    fn index_header(&mut self, h: &IndexHeader) -> std::io::Result<()> {
        self.details(&[
            format!("{}: {} entries of {} bytes", h.kind.description(), h.entries_in_use, h.entry_width),
            format!("Type {:#04X}, subtype {:#04X}", h.index_type, h.subtype),
            format!("Chunk id: {}", h.chunk_id),
            format!("Base offset: {:#X}", h.base_offset),
        ])
    }

    fn index_entry(&mut self, record: &IndexRecord, target: Option<u64>) -> std::io::Result<()> {
        let at = self.address(target);
        let text = match record {
            IndexRecord::Legacy {
                tag,
                flags,
                offset,
                length,
            } => format!(
                "{} {} offset {:#X} length {} flags {}",
                at,
                tag,
                offset,
                length,
                Self::flags(*flags, LEGACY_FLAGS)
            ),
            IndexRecord::Super { size, duration, .. } => {
                format!("{} index of {} bytes, {} ticks", at, size, duration)
            }
            IndexRecord::Standard { offset, size, keyframe } => {
                format!("{} offset {:#X} size {}{}", at, offset, size, key(*keyframe))
            }
            IndexRecord::Field {
                offset,
                second_field,
                size,
                keyframe,
            } => format!(
                "{} offset {:#X} size {} second field {:#X}{}",
                at,
                offset,
                size,
                second_field,
                key(*keyframe)
            ),
        };
        self.line(1, &text)
    }

    fn hex_dump(&mut self, address: Option<u64>, length: u32, bytes: &[u8]) -> std::io::Result<()> {
        let start = address.unwrap_or(0);
        for (i, row) in bytes.chunks(16).enumerate() {
            let groups: Vec<String> = row.chunks(4).map(hex::encode_upper).collect();
            let ascii: String = row
                .iter()
                .map(|c| if c.is_ascii_graphic() { *c as char } else { '.' })
                .collect();
            let at = self.address(Some(start + i as u64 * 16));
            self.line(1, &format!("{}  {:<35}  {}", at, groups.join(" "), ascii))?;
        }
        if (bytes.len() as u64) < length as u64 {
            self.line(1, &format!("... {} more bytes", length as u64 - bytes.len() as u64))?;
        }
        Ok(())
    }
}

fn key(keyframe: bool) -> &'static str {
    if keyframe {
        " keyframe"
    } else {
        ""
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn event(&mut self, event: Event) -> std::io::Result<()> {
        match event {
            Event::Segment {
                address,
                length,
                form,
                base,
            } => {
                if base != 0 {
                    self.wide = true;
                }
                let at = self.address(address);
                self.open(&format!("{} RIFF '{}' length {}", at, form, length))
            }
            Event::EndSegment { consumed, budget, .. } | Event::EndList { consumed, budget, .. } => {
                self.close(consumed, budget)
            }
            Event::List { address, length, name } => {
                let at = self.address(address);
                self.open(&format!("{} LIST '{}' length {}", at, name, length))
            }
            Event::Chunk { address, length, tag } => {
                let at = self.address(address);
                self.line(0, &format!("{} '{}' length {}", at, tag, length))
            }
            Event::MoviChunk {
                address,
                length,
                tag,
                description,
            } => {
                let at = self.address(address);
                self.line(0, &format!("{} '{}' {} length {}", at, tag, description, length))
            }
            Event::MainHeader(h) => self.main_header(&h),
            Event::StreamHeader(h) => self.stream_header(&h),
            Event::VideoFormat(b) => self.details(&[
                format!("Dimensions: {}x{}, {} bits", b.width, b.height, b.bit_count),
                format!("Compression: {} ({})", b.compression, codec_name(b.compression)),
                format!("Image size: {}", b.size_image),
                format!("Pixels per meter: {}x{}", b.x_pels_per_meter, b.y_pels_per_meter),
                format!("Colors used: {}, important: {}", b.clr_used, b.clr_important),
            ]),
            Event::Palette { colors, entries } => {
                self.line(1, &format!("Palette of {} colors", colors))?;
                for (i, c) in entries.iter().enumerate() {
                    self.line(2, &format!("{:3}: #{:02X}{:02X}{:02X}", i, c.red, c.green, c.blue))?;
                }
                Ok(())
            }
            Event::AudioFormat(w) => self.details(&[
                format!("Format: {:#06X} ({})", w.format_tag, audio_format_name(w.format_tag)),
                format!("Channels: {}", w.channels),
                format!("Samples per second: {}", w.samples_per_sec),
                format!("Average bytes per second: {}", w.avg_bytes_per_sec),
                format!("Block align: {}, bits per sample: {}", w.block_align, w.bits_per_sample),
                format!("Extra bytes: {}", w.cb_size),
            ]),
            Event::Mp3Extension(m) => self.details(&[
                format!("MP3 id: {}, flags: {:#010X}", m.id, m.flags),
                format!("Block size: {}, frames per block: {}", m.block_size, m.frames_per_block),
                format!("Codec delay: {}", m.codec_delay),
            ]),
            Event::ExtensibleAudio(x) => self.details(&[
                format!("Valid bits per sample: {}", x.valid_bits_per_sample),
                format!("Channel mask: {:#010X}", x.channel_mask),
                format!("Sub format: {}", x.sub_format),
            ]),
            Event::VideoProperties(v) => {
                let (x, y) = v.aspect();
                self.details(&[
                    format!("Format: {}, standard: {}", v.format_name(), v.standard_name()),
                    format!("Refresh rate: {} Hz", v.refresh_rate),
                    format!("Totals: {} wide, {} lines", v.h_total_in_t, v.v_total_in_lines),
                    format!("Aspect ratio: {}:{}", x, y),
                    format!("Frame: {}x{}, {} fields", v.width, v.height, v.fields_per_frame),
                ])?;
                for (i, f) in v.fields.iter().enumerate() {
                    self.line(
                        2,
                        &format!(
                            "Field {}: compressed {}x{}, valid {}x{} at ({}, {})",
                            i,
                            f.compressed_width,
                            f.compressed_height,
                            f.valid_width,
                            f.valid_height,
                            f.valid_x_offset,
                            f.valid_y_offset
                        ),
                    )?;
                }
                Ok(())
            }
            Event::ExtendedHeader(e) => self.line(1, &format!("Total frames: {}", e.total_frames)),
            Event::Text { label, text, .. } => self.line(1, &format!("{}: \"{}\"", label, text)),
            Event::HexDump { address, length, bytes } => self.hex_dump(address, length, &bytes),
            Event::IndexHeader(h) => self.index_header(&h),
            Event::IndexEntry { record, target } => self.index_entry(&record, target),
            Event::Padding { address, bytes } => {
                let at = self.address(address);
                self.line(1, &format!("{} {} bytes of padding", at, bytes))
            }
            Event::Suppressed { what, count } => self.line(1, &format!("... {} more '{}'", count, what)),
            Event::Skipped { parent, .. } => self.line(1, &format!("skipped, not interpreted under '{}'", parent)),
            Event::Anomaly { address, anomaly } => {
                let at = self.address(address);
                self.line(1, &format!("{} warning: {}", at, anomaly))
            }
            Event::Fatal(message) => writeln!(self.out, "error: {}", message),
        }
    }
}

#[cfg(test)]
mod test_text_report {
    use super::*;
    use riffavi::Anomaly;
    use riffcore::fourcc::FourCC;

    fn render(events: Vec<Event>) -> String {
        let mut report = TextReport::new(vec![], 2);
        for e in events {
            report.event(e).unwrap();
        }
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn nesting() {
        let text = render(vec![
            Event::Segment {
                address: Some(0),
                length: 100,
                form: FourCC(*b"AVI "),
                base: 0,
            },
            Event::List {
                address: Some(12),
                length: 20,
                name: FourCC(*b"hdrl"),
            },
            Event::Chunk {
                address: Some(24),
                length: 4,
                tag: FourCC::JUNK,
            },
            Event::EndList {
                name: FourCC(*b"hdrl"),
                consumed: 16,
                budget: 16,
            },
            Event::EndSegment {
                form: FourCC(*b"AVI "),
                consumed: 20,
                budget: 96,
            },
        ]);

        assert_eq!(
            text,
            "00000000 RIFF 'AVI ' length 100 {\n\
             \x20 0000000C LIST 'hdrl' length 20 {\n\
             \x20   00000018 'JUNK' length 4\n\
             \x20 }\n\
             } 20 of 96 bytes walked\n"
        );
    }

    #[test]
    fn wide_addresses_after_rebase() {
        let text = render(vec![
            Event::Segment {
                address: Some(0x1_0000_0000),
                length: 4,
                form: FourCC(*b"AVIX"),
                base: 0x1_0000_0000,
            },
            Event::Anomaly {
                address: None,
                anomaly: Anomaly::NoMoviBase,
            },
        ]);

        assert!(text.starts_with("0000000100000000 RIFF 'AVIX'"));
        assert!(text.contains("???????????????? warning: no movi list seen yet"));
    }

    #[test]
    fn hex_dump_marks_truncation() {
        let text = render(vec![Event::HexDump {
            address: Some(0x20),
            length: 40,
            bytes: b"0123456789abcdefXYZ".to_vec(),
        }]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  00000020  30313233 34353637 38396162 63646566  0123456789abcdef"));
        assert!(lines[1].starts_with("  00000030  58595A"));
        assert!(lines[1].ends_with("XYZ"));
        assert_eq!(lines[2], "  ... 21 more bytes");
    }

    #[test]
    fn skipped_chunk_names_its_parent() {
        let text = render(vec![
            Event::List {
                address: Some(12),
                length: 24,
                name: FourCC(*b"hdrl"),
            },
            Event::Chunk {
                address: Some(24),
                length: 4,
                tag: FourCC(*b"abcd"),
            },
            Event::Skipped {
                tag: FourCC(*b"abcd"),
                parent: FourCC(*b"hdrl"),
            },
        ]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "  00000018 'abcd' length 4");
        assert_eq!(lines[2], "    skipped, not interpreted under 'hdrl'");
    }
}
