//! Name tables for codec FourCCs, audio format tags and `INFO` elements
//!
//! Codec names follow the registered FourCC list for AVI video codecs. A
//! lookup is a plain linear scan, the tables are only consulted when a
//! header is reported.
use riffcore::fourcc::FourCC;

pub fn lookup<K: PartialEq + Copy>(code: K, table: &[(K, &'static str)], default: &'static str) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == code)
        .map_or(default, |(_, name)| *name)
}

/// Codec FourCCs are matched case insensitively
pub fn codec_name(code: FourCC) -> &'static str {
    lookup(code.to_ascii_uppercase(), CODECS, "Unknown FourCC")
}

pub fn audio_format_name(tag: u16) -> &'static str {
    lookup(tag, AUDIO_FORMATS, "Unknown Format")
}

pub fn info_name(tag: FourCC) -> &'static str {
    lookup(tag, INFO_TAGS, "Unknown INFO element")
}

pub const CODECS: &[(FourCC, &str)] = &[
    (FourCC::ZERO, "None Specified"),
    (FourCC(*b"ANIM"), "Intel RDX"),
    (FourCC(*b"AUR2"), "AuraVision Aura 2"),
    (FourCC(*b"AURA"), "AuraVision Aura 1"),
    (FourCC(*b"BT20"), "Brooktree MediaStream"),
    (FourCC(*b"BTCV"), "Brooktree Composite Video"),
    (FourCC(*b"CC12"), "Intel YUV12"),
    (FourCC(*b"CDVC"), "Canopus DV"),
    (FourCC(*b"CHAM"), "Winnov Caviara Cham"),
    (FourCC(*b"CLJR"), "Proprietary YUV 4 pixels"),
    (FourCC(*b"CMYK"), "Common Data Format in Printing"),
    (FourCC(*b"CPLA"), "Weitek 4:2:0 YUV Planar"),
    (FourCC(*b"CVID"), "Cinepak by Supermac"),
    (FourCC(*b"CWLT"), "Microsoft Color WLT DIB"),
    (FourCC(*b"CYUV"), "Creative Labs YUV"),
    (FourCC(*b"D261"), "H.261"),
    (FourCC(*b"D263"), "H.263"),
    (FourCC(*b"DIV3"), "Low motion DivX MPEG-4"),
    (FourCC(*b"DIV4"), "Fast motion DivX MPEG-4"),
    (FourCC(*b"DUCK"), "True Motion 1.0"),
    (FourCC(*b"DVE2"), "DVE-2 Videoconferencing"),
    (FourCC(*b"FLJP"), "Field Encoded Motion JPEG"),
    (FourCC(*b"FVF1"), "Fractal Video Frame"),
    (FourCC(*b"GWLT"), "Microsoft Greyscale WLT DIB"),
    (FourCC(*b"H260"), "H.260"),
    (FourCC(*b"H261"), "H.261"),
    (FourCC(*b"H262"), "H.262"),
    (FourCC(*b"H263"), "H.263"),
    (FourCC(*b"H264"), "H.264"),
    (FourCC(*b"H265"), "H.265"),
    (FourCC(*b"H266"), "H.266"),
    (FourCC(*b"H267"), "H.267"),
    (FourCC(*b"H268"), "H.268"),
    (FourCC(*b"H269"), "H.269"),
    (FourCC(*b"I263"), "I263"),
    (FourCC(*b"I420"), "Intel Indeo 4"),
    (FourCC(*b"IAN "), "Intel RDX"),
    (FourCC(*b"ICLB"), "CellB Videoconferencing Codec"),
    (FourCC(*b"ILVC"), "Intel Layered Video"),
    (FourCC(*b"ILVR"), "ITU-T H.263+"),
    (FourCC(*b"IRAW"), "Intel YUV Uncompressed"),
    (FourCC(*b"IV30"), "Intel Indeo Video 3"),
    (FourCC(*b"IV31"), "Intel Indeo Video 3.1"),
    (FourCC(*b"IV32"), "Intel Indeo Video 3.2"),
    (FourCC(*b"IV33"), "Intel Indeo Video 3.3"),
    (FourCC(*b"IV34"), "Intel Indeo Video 3.4"),
    (FourCC(*b"IV35"), "Intel Indeo Video 3.5"),
    (FourCC(*b"IV36"), "Intel Indeo Video 3.6"),
    (FourCC(*b"IV37"), "Intel Indeo Video 3.7"),
    (FourCC(*b"IV38"), "Intel Indeo Video 3.8"),
    (FourCC(*b"IV39"), "Intel Indeo Video 3.9"),
    (FourCC(*b"IV40"), "Intel Indeo Video 4.0"),
    (FourCC(*b"IV41"), "Intel Indeo Video 4.1"),
    (FourCC(*b"IV42"), "Intel Indeo Video 4.2"),
    (FourCC(*b"IV43"), "Intel Indeo Video 4.3"),
    (FourCC(*b"IV44"), "Intel Indeo Video 4.4"),
    (FourCC(*b"IV45"), "Intel Indeo Video 4.5"),
    (FourCC(*b"IV46"), "Intel Indeo Video 4.6"),
    (FourCC(*b"IV47"), "Intel Indeo Video 4.7"),
    (FourCC(*b"IV48"), "Intel Indeo Video 4.8"),
    (FourCC(*b"IV49"), "Intel Indeo Video 4.9"),
    (FourCC(*b"IV50"), "Intel Indeo Video 5.0"),
    (FourCC(*b"JPEG"), "Still Image JPEG DIB"),
    (FourCC(*b"MJPG"), "Motion JPEG DIB"),
    (FourCC(*b"MP42"), "Microsoft MPEG-4 Video Codec"),
    (FourCC(*b"MPEG"), "MPEG 1 Video Frame"),
    (FourCC(*b"MRCA"), "MR Codec"),
    (FourCC(*b"MRLE"), "Run Length Encoding"),
    (FourCC(*b"MSVC"), "Video 1"),
    (FourCC(*b"PHMO"), "Photomotion"),
    (FourCC(*b"QPEQ"), "QPEG 1.1 Format Video"),
    (FourCC(*b"RGBT"), "RGBT"),
    (FourCC(*b"RLE4"), "Run Length Encoded 4"),
    (FourCC(*b"RLE8"), "Run Length Encoded 8"),
    (FourCC(*b"RT21"), "Indeo 2.1"),
    (FourCC(*b"RVX "), "Intel RDX"),
    (FourCC(*b"SDCC"), "Sun Digital Camera Codec"),
    (FourCC(*b"SFMC"), "Crystal Net SFM Codec"),
    (FourCC(*b"SMSC"), "SMSC"),
    (FourCC(*b"SMSD"), "SMSD"),
    (FourCC(*b"SPLC"), "Splash Studios ACM Audio Codec"),
    (FourCC(*b"SQZ2"), "Microsoft VXtreme Video Codec"),
    (FourCC(*b"SV10"), "Sorenson Video R1"),
    (FourCC(*b"TLMS"), "TeraLogic Motion Infraframe Codec A"),
    (FourCC(*b"TLST"), "TeraLogic Motion Infraframe Codec B"),
    (FourCC(*b"TM20"), "TrueMotion 2.0"),
    (FourCC(*b"TMIC"), "TeraLogic Motion Intraframe Codec 2"),
    (FourCC(*b"TMOT"), "TrueMotion Video Compression"),
    (FourCC(*b"TR20"), "TrueMotion RT 2.0"),
    (FourCC(*b"ULTI"), "Ultimotion"),
    (FourCC(*b"UYVY"), "UYVY 4:2:2 byte ordering"),
    (FourCC(*b"V422"), "24 bit YUV 4:2:2 Format"),
    (FourCC(*b"V655"), "16 bit YUV 4:2:2 Format"),
    (FourCC(*b"VCR1"), "ATI VCR 1.0"),
    (FourCC(*b"VCR2"), "ATI VCR 2.0"),
    (FourCC(*b"VCR3"), "ATI VCR 3.0"),
    (FourCC(*b"VCR4"), "ATI VCR 4.0"),
    (FourCC(*b"VCR5"), "ATI VCR 5.0"),
    (FourCC(*b"VCR6"), "ATI VCR 6.0"),
    (FourCC(*b"VCR7"), "ATI VCR 7.0"),
    (FourCC(*b"VCR8"), "ATI VCR 8.0"),
    (FourCC(*b"VCR9"), "ATI VCR 9.0"),
    (FourCC(*b"VDCT"), "Video Maker Pro DIB"),
    (FourCC(*b"VIDS"), "YUV 4:2:2 CCIR 601 for V422"),
    (FourCC(*b"VIVO"), "Vivo H.263"),
    (FourCC(*b"VIXL"), "VIXL"),
    (FourCC(*b"VLV1"), "VLCAP.DRV"),
    (FourCC(*b"WBVC"), "W9960"),
    (FourCC(*b"X263"), "X263"),
    (FourCC(*b"XLV0"), "XL Video Decoder"),
    (FourCC(*b"Y211"), "YUV 2:1:1 Packed"),
    (FourCC(*b"Y411"), "YUV 4:1:1 Packed"),
    (FourCC(*b"Y41B"), "YUV 4:1:1 Planar"),
    (FourCC(*b"Y41P"), "PC1 4:1:1"),
    (FourCC(*b"Y41T"), "PC1 4:1:1 with transparency"),
    (FourCC(*b"Y42B"), "YUV 4:2:2 Planar"),
    (FourCC(*b"Y42T"), "PCI 4:2:2 with transparency"),
    (FourCC(*b"YC12"), "Intel YUV12 Codec"),
    (FourCC(*b"YUV8"), "Winnov Caviar YUV8"),
    (FourCC(*b"YUV9"), "YUV9"),
    (FourCC(*b"YUY2"), "YUYV 4:2:2 byte ordering packed"),
    (FourCC(*b"YUYV"), "BI_YUYV, Canopus"),
    (FourCC(*b"YV12"), "YVU12 Planar"),
    (FourCC(*b"YVU9"), "YVU9 Planar"),
    (FourCC(*b"YVYU"), "YVYU 4:2:2 byte ordering"),
    (FourCC(*b"ZPEG"), "Video Zipper"),
];

pub const AUDIO_FORMATS: &[(u16, &str)] = &[
    (0x0000, "Microsoft Unknown Wave Format"),
    (0x0001, "Microsoft PCM Format"),
    (0x0002, "Microsoft ADPCM Format"),
    (0x0003, "IEEE Float"),
    (0x0004, "Compaq Computer's VSELP"),
    (0x0005, "IBM CVSD"),
    (0x0006, "Microsoft ALAW"),
    (0x0007, "Microsoft MULAW"),
    (0x0010, "OKI ADPCM"),
    (0x0011, "Intel's DVI ADPCM"),
    (0x0012, "Videologic's MediaSpace ADPCM"),
    (0x0013, "Sierra ADPCM"),
    (0x0014, "G.723 ADPCM"),
    (0x0015, "DSP Solution's DIGISTD"),
    (0x0016, "DSP Solution's DIGIFIX"),
    (0x0017, "Dialogic OKI ADPCM"),
    (0x0018, "MediaVision ADPCM"),
    (0x0019, "HP CU"),
    (0x0020, "Yamaha ADPCM"),
    (0x0021, "Speech Compression's Sonarc"),
    (0x0022, "DSP Group's True Speech"),
    (0x0023, "Echo Speech's EchoSC1"),
    (0x0024, "Audiofile AF36"),
    (0x0025, "APTX"),
    (0x0026, "AudioFile AF10"),
    (0x0027, "Prosody 1612"),
    (0x0028, "LRC"),
    (0x0030, "Dolby AC2"),
    (0x0031, "GSM610"),
    (0x0032, "MSNAudio"),
    (0x0033, "Antex ADPCME"),
    (0x0034, "Control Res VQLPC"),
    (0x0035, "Digireal"),
    (0x0036, "DigiADPCM"),
    (0x0037, "Control Res CR10"),
    (0x0038, "NMS VBXADPCM"),
    (0x0039, "Roland RDAC"),
    (0x003A, "EchoSC3"),
    (0x003B, "Rockwell ADPCM"),
    (0x003C, "Rockwell Digit LK"),
    (0x003D, "Xebec"),
    (0x0040, "Antex Electronics G.721"),
    (0x0041, "G.728 CELP"),
    (0x0042, "MSG723"),
    (0x0050, "MPEG"),
    (0x0052, "RT24"),
    (0x0053, "PAC"),
    (0x0055, "MPEG Layer 3"),
    (0x0059, "Lucent G.723"),
    (0x0060, "Cirrus"),
    (0x0061, "ESPCM"),
    (0x0062, "Voxware"),
    (0x0063, "Canopus Atrac"),
    (0x0064, "G.726 ADPCM"),
    (0x0065, "G.722 ADPCM"),
    (0x0066, "DSAT"),
    (0x0067, "DSAT Display"),
    (0x0069, "Voxware Byte Aligned"),
    (0x0070, "Voxware AC8"),
    (0x0071, "Voxware AC10"),
    (0x0072, "Voxware AC16"),
    (0x0073, "Voxware AC20"),
    (0x0074, "Voxware MetaVoice"),
    (0x0075, "Voxware MetaSound"),
    (0x0076, "Voxware RT29HW"),
    (0x0077, "Voxware VR12"),
    (0x0078, "Voxware VR18"),
    (0x0079, "Voxware TQ40"),
    (0x0080, "Softsound"),
    (0x0081, "Voxware TQ60"),
    (0x0082, "MSRT24"),
    (0x0083, "G.729A"),
    (0x0084, "MVI MV12"),
    (0x0085, "DF G.726"),
    (0x0086, "DF GSM610"),
    (0x0088, "ISIAudio"),
    (0x0089, "Onlive"),
    (0x0091, "SBC24"),
    (0x0092, "Dolby AC3 SPDIF"),
    (0x0097, "ZyXEL ADPCM"),
    (0x0098, "Philips LPCBB"),
    (0x0099, "Packed"),
    (0x0100, "Rhetorex ADPCM"),
    (0x0101, "BeCubed Software's IRAT"),
    (0x0111, "Vivo G.723"),
    (0x0112, "Vivo Siren"),
    (0x0123, "Digital G.723"),
    (0x0200, "Creative ADPCM"),
    (0x0202, "Creative FastSpeech8"),
    (0x0203, "Creative FastSpeech10"),
    (0x0220, "Quarterdeck"),
    (0x0300, "FM Towns Snd"),
    (0x0400, "BTV Digital"),
    (0x0680, "VME VMPCM"),
    (0x1000, "OLIGSM"),
    (0x1001, "OLIADPCM"),
    (0x1002, "OLICELP"),
    (0x1003, "OLISBC"),
    (0x1004, "OLIOPR"),
    (0x1100, "LH Codec"),
    (0x1400, "Norris"),
    (0x1401, "ISIAudio"),
    (0x1500, "Soundspace Music Compression"),
    (0x2000, "AC3 DVM"),
    (0x2001, "DTS"),
    (0xFFFE, "Wave Format Extensible"),
];

pub const INFO_TAGS: &[(FourCC, &str)] = &[
    (FourCC(*b"IARL"), "Archival Location"),
    (FourCC(*b"IART"), "Artist"),
    (FourCC(*b"ICMS"), "Commissioned"),
    (FourCC(*b"ICMT"), "Comment"),
    (FourCC(*b"ICOP"), "Copyright"),
    (FourCC(*b"ICRD"), "Creation date"),
    (FourCC(*b"ICRP"), "Cropped"),
    (FourCC(*b"IDIM"), "Dimensions"),
    (FourCC(*b"IDPI"), "Dots Per Inch"),
    (FourCC(*b"IENG"), "Engineer"),
    (FourCC(*b"IGNR"), "Genre"),
    (FourCC(*b"IKEY"), "Keywords"),
    (FourCC(*b"ILGT"), "Lightness"),
    (FourCC(*b"IMED"), "Storage Medium"),
    (FourCC(*b"INAM"), "Name"),
    (FourCC(*b"IPLT"), "Num Palette Colors"),
    (FourCC(*b"IPRD"), "Product"),
    (FourCC(*b"ISBJ"), "Subject"),
    (FourCC(*b"ISFT"), "Software"),
    (FourCC(*b"ISHP"), "Sharpness"),
    (FourCC(*b"ISRC"), "Source"),
    (FourCC(*b"ISRF"), "Source Form"),
    (FourCC(*b"ITCH"), "Technician"),
];

#[cfg(test)]
mod test_lookup {
    use super::*;

    #[test]
    fn codecs_ignore_case() {
        assert_eq!(codec_name(FourCC(*b"MJPG")), "Motion JPEG DIB");
        assert_eq!(codec_name(FourCC(*b"mjpg")), "Motion JPEG DIB");
        assert_eq!(codec_name(FourCC(*b"cvid")), "Cinepak by Supermac");
        assert_eq!(codec_name(FourCC::ZERO), "None Specified");
        assert_eq!(codec_name(FourCC(*b"XVID")), "Unknown FourCC");
    }

    #[test]
    fn audio_formats() {
        assert_eq!(audio_format_name(0x0001), "Microsoft PCM Format");
        assert_eq!(audio_format_name(0x0055), "MPEG Layer 3");
        assert_eq!(audio_format_name(0xFFFE), "Wave Format Extensible");
        assert_eq!(audio_format_name(0x4242), "Unknown Format");
    }

    #[test]
    fn info_elements_are_case_sensitive() {
        assert_eq!(info_name(FourCC(*b"INAM")), "Name");
        assert_eq!(info_name(FourCC(*b"ISFT")), "Software");
        assert_eq!(info_name(FourCC(*b"inam")), "Unknown INFO element");
    }

    #[test]
    fn first_match_wins() {
        let table = [(1u8, "one"), (2, "two"), (1, "uno")];
        assert_eq!(lookup(1, &table, "none"), "one");
        assert_eq!(lookup(3, &table, "none"), "none");
    }
}
