// File: src/core/boundary.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// First and last codepoints of the CJK Unified Ideographs block.
pub const HAN_START: u32 = 0x4E00;
pub const HAN_END: u32 = 0x9FFF;

/// Start of a phonetic-initial bucket inside the Han block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryEntry {
    pub codepoint: u32,
    pub initial: char,
}

const fn entry(codepoint: u32, initial: char) -> BoundaryEntry {
    BoundaryEntry { codepoint, initial }
}

/// Bucket starts, ascending by codepoint. Each anchor is a character whose
/// reading begins with the bucket's initial. Pinyin has no i, u or v initials.
///
/// Unicode orders Han characters by radical and stroke count, not by reading,
/// so this is an approximation. Characters it gets wrong in practice belong in
/// [`SPECIAL_OVERRIDES`].
pub const BOUNDARY_TABLE: [BoundaryEntry; 23] = [
    entry(0x554A, 'a'), // 啊
    entry(0x5DF4, 'b'), // 巴
    entry(0x64E6, 'c'), // 擦
    entry(0x6EF4, 'd'), // 滴
    entry(0x723E, 'e'), // 爾
    entry(0x767C, 'f'), // 發
    entry(0x7BA1, 'g'), // 管
    entry(0x82B1, 'h'), // 花
    entry(0x89C1, 'j'), // 见
    entry(0x8AB2, 'k'), // 課
    entry(0x8CF4, 'l'), // 賴
    entry(0x8FC8, 'm'), // 迈
    entry(0x90A3, 'n'), // 那
    entry(0x93C2, 'o'), // 鏂
    entry(0x966A, 'p'), // 陪
    entry(0x9752, 'q'), // 青
    entry(0x97E7, 'r'), // 韧
    entry(0x987A, 's'), // 顺
    entry(0x9898, 't'), // 题
    entry(0x9935, 'w'), // 餵
    entry(0x9999, 'x'), // 香
    entry(0x9E2D, 'y'), // 鸭
    entry(0x9EF9, 'z'), // 黹
];

/// Forced initials for frequent characters with several readings, or whose
/// codepoint lands in the wrong bucket. Checked before the range lookup.
pub static SPECIAL_OVERRIDES: Lazy<HashMap<char, char>> = Lazy::new(|| {
    [
        ('长', 'c'), ('行', 'x'), ('重', 'z'), ('乐', 'l'), ('还', 'h'),
        ('朝', 'c'), ('单', 'd'), ('传', 'c'), ('藏', 'c'), ('参', 'c'),
        ('曾', 'z'), ('仇', 'q'), ('解', 'j'), ('朴', 'p'), ('区', 'q'),
        ('查', 'c'), ('覃', 'q'), ('尉', 'w'), ('了', 'l'), ('都', 'd'),
        ('和', 'h'), ('大', 'd'), ('少', 's'), ('差', 'c'), ('会', 'h'),
        ('便', 'b'), ('薄', 'b'), ('强', 'q'), ('降', 'j'), ('给', 'g'),
        ('地', 'd'), ('的', 'd'), ('得', 'd'), ('着', 'z'), ('觉', 'j'),
        ('角', 'j'), ('教', 'j'), ('数', 's'), ('率', 'l'), ('省', 's'),
        ('宿', 's'), ('弹', 't'), ('沈', 's'), ('张', 'z'), ('李', 'l'),
        ('王', 'w'), ('陈', 'c'), ('刘', 'l'), ('杨', 'y'), ('黄', 'h'),
        ('赵', 'z'), ('周', 'z'), ('吴', 'w'), ('三', 's'), ('四', 's'),
        // Common given-name characters.
        ('一', 'y'), ('小', 'x'), ('明', 'm'), ('文', 'w'), ('国', 'g'),
        ('天', 't'), ('子', 'z'), ('美', 'm'), ('春', 'c'), ('月', 'y'),
        ('云', 'y'), ('雨', 'y'), ('海', 'h'), ('山', 's'), ('风', 'f'),
        ('龙', 'l'), ('五', 'w'), ('六', 'l'), ('人', 'r'), ('安', 'a'),
        // Names from the tagged image library.
        ('鸣', 'm'), ('潮', 'c'), ('今', 'j'), ('汐', 'x'), ('离', 'l'),
        ('椿', 'c'), ('守', 's'), ('岸', 'a'), ('秧', 'y'), ('丹', 'd'),
        ('瑾', 'j'), ('凌', 'l'), ('阳', 'y'), ('散', 's'), ('华', 'h'),
        ('白', 'b'), ('芷', 'z'), ('吟', 'y'), ('霖', 'l'), ('卡', 'k'),
        ('琳', 'l'), ('炎', 'y'), ('珂', 'k'), ('漂', 'p'), ('泊', 'b'),
        ('者', 'z'),
    ]
    .into_iter()
    .collect()
});

/// True when `table` is strictly ascending by codepoint, which the binary
/// search in the classifier relies on.
pub fn is_sorted_table(table: &[BoundaryEntry]) -> bool {
    table.windows(2).all(|pair| pair[0].codepoint < pair[1].codepoint)
}

/// Whether `c` falls in the Han block the boundary table covers.
#[inline]
pub fn is_han(c: char) -> bool {
    (HAN_START..=HAN_END).contains(&(c as u32))
}

/// Initial of the greatest entry whose codepoint is <= `codepoint`.
/// Below the first entry the first initial is used.
pub fn lookup_initial(table: &[BoundaryEntry], codepoint: u32) -> char {
    // Index of the first entry strictly greater than `codepoint`.
    let upper = table.partition_point(|e| e.codepoint <= codepoint);
    match upper {
        0 => table.first().map_or('a', |e| e.initial),
        i => table[i - 1].initial,
    }
}
