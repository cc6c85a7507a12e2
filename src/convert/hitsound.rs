//! Bit-flag hitsound reconciliation for slider edges.

use crate::file::beatmap::HitSound;

/// Keeps the whistle, finish and clap flags of a raw hitsound value. The normal bits are dropped.
#[must_use]
pub fn decode(value: u32) -> HitSound {
    // only the low byte can carry flags
    HitSound::from((value & 0xff) as u8) & HitSound::ADDITIONS
}

/// Encodes additions as a slider edge hitsound, always with the normal baseline bit.
#[must_use]
pub fn encode(additions: HitSound) -> HitSound {
    HitSound::EDGE_NORMAL | (additions & HitSound::ADDITIONS)
}

/// Union of the additions of an edge's base hitsound and its two overrides.
#[must_use]
pub fn combine(edge_base: u32, edge_override_1: u32, edge_override_2: u32) -> HitSound {
    encode(decode(edge_base) | decode(edge_override_1) | decode(edge_override_2))
}

/// Hitsounds of every edge of a slider, from head to tail.
///
/// Both override lists are indexed by edge. Missing entries count as no hitsound and
/// entries past the last edge are ignored.
#[must_use]
pub fn edge_hitsounds(
    base: Option<HitSound>,
    endsounds: &[u32],
    inline_hitsounds: &[u32],
    edge_count: usize,
) -> Vec<HitSound> {
    if endsounds.len() > edge_count || inline_hitsounds.len() > edge_count {
        log::warn!(
            "Slider has {edge_count} edges but {} endsounds and {} inline hitsounds, ignoring the extra ones",
            endsounds.len(),
            inline_hitsounds.len()
        );
    }

    let base = base.map_or(0, |hs| u32::from(hs.bits()));
    (0..edge_count)
        .map(|i| {
            let endsound = endsounds.get(i).copied().unwrap_or(0);
            let inline = inline_hitsounds.get(i).copied().unwrap_or(0);
            combine(base, endsound, inline)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{combine, decode, edge_hitsounds, encode};
    use crate::file::beatmap::HitSound;

    #[test]
    fn decode_ignores_normal_bits() {
        assert_eq!(decode(0), HitSound::NONE);
        assert_eq!(decode(1), HitSound::NONE);
        assert_eq!(decode(16), HitSound::NONE);
        assert_eq!(decode(2), HitSound::WHISTLE);
        assert_eq!(decode(4), HitSound::FINISH);
        assert_eq!(decode(8), HitSound::CLAP);
        assert_eq!(decode(31), HitSound::ADDITIONS);
    }

    #[test]
    fn encode_sets_baseline() {
        assert_eq!(encode(HitSound::NONE).bits(), 16);
        assert_eq!(encode(HitSound::WHISTLE).bits(), 18);
        assert_eq!(encode(HitSound::FINISH | HitSound::CLAP).bits(), 28);
        assert_eq!(encode(HitSound::ADDITIONS).bits(), 30);
    }

    #[test]
    fn encode_decode_keeps_additions() {
        for v in 0..=15_u32 {
            let encoded = u32::from(encode(decode(v)).bits());
            assert_eq!(encoded & 0b11110, (v & 0b1110) | 16, "value {v}");
        }
    }

    #[test]
    fn combine_is_a_union() {
        assert_eq!(combine(0, 0, 0).bits(), 16);
        assert_eq!(combine(2, 8, 0).bits(), 26);
        assert_eq!(combine(2, 2, 2).bits(), 18);
        assert_eq!(combine(1, 4, 8).bits(), 28);
    }

    #[test]
    fn slider_edges() {
        let edges = edge_hitsounds(Some(HitSound::NONE), &[8, 4], &[], 3);
        let bits: Vec<_> = edges.iter().map(|hs| hs.bits()).collect();
        assert_eq!(bits, [24, 20, 16]);

        let edges = edge_hitsounds(Some(HitSound::WHISTLE), &[8], &[4, 0, 8], 3);
        let bits: Vec<_> = edges.iter().map(|hs| hs.bits()).collect();
        assert_eq!(bits, [30, 18, 26]);
    }

    #[test]
    fn edge_count_is_enforced() {
        assert_eq!(edge_hitsounds(Some(HitSound::NONE), &[], &[], 2).len(), 2);
        assert_eq!(edge_hitsounds(Some(HitSound::NONE), &[2, 2, 2, 2, 2], &[8; 6], 4).len(), 4);
    }

    #[test]
    fn base_can_be_left_out() {
        let edges = edge_hitsounds(None, &[8], &[], 2);
        let bits: Vec<_> = edges.iter().map(|hs| hs.bits()).collect();
        assert_eq!(bits, [24, 16]);

        let edges = edge_hitsounds(Some(HitSound::CLAP), &[], &[], 2);
        let bits: Vec<_> = edges.iter().map(|hs| hs.bits()).collect();
        assert_eq!(bits, [24, 24]);
    }
}
