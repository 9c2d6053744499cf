//! Standard-font text metrics
//!
//! Right-aligned columns need the rendered width of a string before it is
//! placed, so the advance widths of the three core fonts the overlays use
//! are tabled here (Adobe core-font metrics, thousandths of an em).

/// The standard Type 1 fonts the overlays draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    TimesRoman,
    TimesBold,
}

impl Font {
    /// PostScript BaseFont name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::TimesRoman => "Times-Roman",
            Font::TimesBold => "Times-Bold",
        }
    }

    /// Resource name used inside overlay content streams. Prefixed so a
    /// stamped page cannot collide with names the template already uses.
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "OvHelv",
            Font::TimesRoman => "OvTimes",
            Font::TimesBold => "OvTimesBd",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::TimesRoman => &TIMES_ROMAN_WIDTHS,
            Font::TimesBold => &TIMES_BOLD_WIDTHS,
        }
    }
}

/// Width of `text` in points when set in `font` at `size`.
///
/// Characters outside printable ASCII fall back to the space width; the
/// ledger data these overlays draw is plain ASCII.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let widths = font.widths();
    let units: u32 = text
        .chars()
        .map(|ch| {
            let index = (ch as u32).wrapping_sub(0x20);
            if index < 95 {
                u32::from(widths[index as usize])
            } else {
                u32::from(widths[0])
            }
        })
        .sum();
    units as f32 * size / 1000.0
}

// Advance widths for ASCII 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    //  SP    !    "    #    $    %    &    '    (    )
       278, 278, 355, 556, 556, 889, 667, 191, 333, 333,
    //   *    +    ,    -    .    /    0    1    2    3
       389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    //   4    5    6    7    8    9    :    ;    <    =
       556, 556, 556, 556, 556, 556, 278, 278, 584, 584,
    //   >    ?    @    A    B    C    D    E    F    G
       584, 556, 1015, 667, 667, 722, 722, 667, 611, 778,
    //   H    I    J    K    L    M    N    O    P    Q
       722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
    //   R    S    T    U    V    W    X    Y    Z    [
       722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    //   \    ]    ^    _    `    a    b    c    d    e
       278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    //   f    g    h    i    j    k    l    m    n    o
       278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    //   p    q    r    s    t    u    v    w    x    y
       556, 556, 333, 500, 278, 556, 500, 722, 500, 500,
    //   z    {    |    }    ~
       500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    //  SP    !    "    #    $    %    &    '    (    )
       250, 333, 408, 500, 500, 833, 778, 180, 333, 333,
    //   *    +    ,    -    .    /    0    1    2    3
       500, 564, 250, 333, 250, 278, 500, 500, 500, 500,
    //   4    5    6    7    8    9    :    ;    <    =
       500, 500, 500, 500, 500, 500, 278, 278, 564, 564,
    //   >    ?    @    A    B    C    D    E    F    G
       564, 444, 921, 722, 667, 667, 722, 611, 556, 722,
    //   H    I    J    K    L    M    N    O    P    Q
       722, 333, 389, 722, 611, 889, 722, 722, 556, 722,
    //   R    S    T    U    V    W    X    Y    Z    [
       667, 556, 611, 722, 722, 944, 722, 722, 611, 333,
    //   \    ]    ^    _    `    a    b    c    d    e
       278, 333, 469, 500, 333, 444, 500, 444, 500, 444,
    //   f    g    h    i    j    k    l    m    n    o
       333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    //   p    q    r    s    t    u    v    w    x    y
       500, 500, 333, 389, 278, 500, 500, 722, 500, 500,
    //   z    {    |    }    ~
       444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    //  SP    !    "    #    $    %    &    '    (    )
       250, 333, 555, 500, 500, 1000, 833, 278, 333, 333,
    //   *    +    ,    -    .    /    0    1    2    3
       500, 570, 250, 333, 250, 278, 500, 500, 500, 500,
    //   4    5    6    7    8    9    :    ;    <    =
       500, 500, 500, 500, 500, 500, 333, 333, 570, 570,
    //   >    ?    @    A    B    C    D    E    F    G
       570, 500, 930, 722, 667, 722, 722, 667, 611, 778,
    //   H    I    J    K    L    M    N    O    P    Q
       778, 389, 500, 778, 667, 944, 722, 778, 611, 778,
    //   R    S    T    U    V    W    X    Y    Z    [
       722, 556, 667, 722, 722, 1000, 722, 722, 667, 333,
    //   \    ]    ^    _    `    a    b    c    d    e
       278, 333, 581, 500, 333, 500, 556, 444, 556, 444,
    //   f    g    h    i    j    k    l    m    n    o
       333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    //   p    q    r    s    t    u    v    w    x    y
       556, 556, 444, 389, 333, 556, 500, 722, 500, 500,
    //   z    {    |    }    ~
       444, 394, 220, 394, 520,
];
