/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Named colors, the CSS Color Module Level 4 keyword set

use crate::rgba::Rgba;

/// Named colors sorted by name so lookups can binary search
#[rustfmt::skip]
pub(crate) static NAMED_COLORS: [(&str, Rgba); 148] = [
    ("aliceblue", Rgba::opaque(240, 248, 255)),
    ("antiquewhite", Rgba::opaque(250, 235, 215)),
    ("aqua", Rgba::opaque(0, 255, 255)),
    ("aquamarine", Rgba::opaque(127, 255, 212)),
    ("azure", Rgba::opaque(240, 255, 255)),
    ("beige", Rgba::opaque(245, 245, 220)),
    ("bisque", Rgba::opaque(255, 228, 196)),
    ("black", Rgba::opaque(0, 0, 0)),
    ("blanchedalmond", Rgba::opaque(255, 235, 205)),
    ("blue", Rgba::opaque(0, 0, 255)),
    ("blueviolet", Rgba::opaque(138, 43, 226)),
    ("brown", Rgba::opaque(165, 42, 42)),
    ("burlywood", Rgba::opaque(222, 184, 135)),
    ("cadetblue", Rgba::opaque(95, 158, 160)),
    ("chartreuse", Rgba::opaque(127, 255, 0)),
    ("chocolate", Rgba::opaque(210, 105, 30)),
    ("coral", Rgba::opaque(255, 127, 80)),
    ("cornflowerblue", Rgba::opaque(100, 149, 237)),
    ("cornsilk", Rgba::opaque(255, 248, 220)),
    ("crimson", Rgba::opaque(220, 20, 60)),
    ("cyan", Rgba::opaque(0, 255, 255)),
    ("darkblue", Rgba::opaque(0, 0, 139)),
    ("darkcyan", Rgba::opaque(0, 139, 139)),
    ("darkgoldenrod", Rgba::opaque(184, 134, 11)),
    ("darkgray", Rgba::opaque(169, 169, 169)),
    ("darkgreen", Rgba::opaque(0, 100, 0)),
    ("darkgrey", Rgba::opaque(169, 169, 169)),
    ("darkkhaki", Rgba::opaque(189, 183, 107)),
    ("darkmagenta", Rgba::opaque(139, 0, 139)),
    ("darkolivegreen", Rgba::opaque(85, 107, 47)),
    ("darkorange", Rgba::opaque(255, 140, 0)),
    ("darkorchid", Rgba::opaque(153, 50, 204)),
    ("darkred", Rgba::opaque(139, 0, 0)),
    ("darksalmon", Rgba::opaque(233, 150, 122)),
    ("darkseagreen", Rgba::opaque(143, 188, 143)),
    ("darkslateblue", Rgba::opaque(72, 61, 139)),
    ("darkslategray", Rgba::opaque(47, 79, 79)),
    ("darkslategrey", Rgba::opaque(47, 79, 79)),
    ("darkturquoise", Rgba::opaque(0, 206, 209)),
    ("darkviolet", Rgba::opaque(148, 0, 211)),
    ("deeppink", Rgba::opaque(255, 20, 147)),
    ("deepskyblue", Rgba::opaque(0, 191, 255)),
    ("dimgray", Rgba::opaque(105, 105, 105)),
    ("dimgrey", Rgba::opaque(105, 105, 105)),
    ("dodgerblue", Rgba::opaque(30, 144, 255)),
    ("firebrick", Rgba::opaque(178, 34, 34)),
    ("floralwhite", Rgba::opaque(255, 250, 240)),
    ("forestgreen", Rgba::opaque(34, 139, 34)),
    ("fuchsia", Rgba::opaque(255, 0, 255)),
    ("gainsboro", Rgba::opaque(220, 220, 220)),
    ("ghostwhite", Rgba::opaque(248, 248, 255)),
    ("gold", Rgba::opaque(255, 215, 0)),
    ("goldenrod", Rgba::opaque(218, 165, 32)),
    ("gray", Rgba::opaque(128, 128, 128)),
    ("green", Rgba::opaque(0, 128, 0)),
    ("greenyellow", Rgba::opaque(173, 255, 47)),
    ("grey", Rgba::opaque(128, 128, 128)),
    ("honeydew", Rgba::opaque(240, 255, 240)),
    ("hotpink", Rgba::opaque(255, 105, 180)),
    ("indianred", Rgba::opaque(205, 92, 92)),
    ("indigo", Rgba::opaque(75, 0, 130)),
    ("ivory", Rgba::opaque(255, 255, 240)),
    ("khaki", Rgba::opaque(240, 230, 140)),
    ("lavender", Rgba::opaque(230, 230, 250)),
    ("lavenderblush", Rgba::opaque(255, 240, 245)),
    ("lawngreen", Rgba::opaque(124, 252, 0)),
    ("lemonchiffon", Rgba::opaque(255, 250, 205)),
    ("lightblue", Rgba::opaque(173, 216, 230)),
    ("lightcoral", Rgba::opaque(240, 128, 128)),
    ("lightcyan", Rgba::opaque(224, 255, 255)),
    ("lightgoldenrodyellow", Rgba::opaque(250, 250, 210)),
    ("lightgray", Rgba::opaque(211, 211, 211)),
    ("lightgreen", Rgba::opaque(144, 238, 144)),
    ("lightgrey", Rgba::opaque(211, 211, 211)),
    ("lightpink", Rgba::opaque(255, 182, 193)),
    ("lightsalmon", Rgba::opaque(255, 160, 122)),
    ("lightseagreen", Rgba::opaque(32, 178, 170)),
    ("lightskyblue", Rgba::opaque(135, 206, 250)),
    ("lightslategray", Rgba::opaque(119, 136, 153)),
    ("lightslategrey", Rgba::opaque(119, 136, 153)),
    ("lightsteelblue", Rgba::opaque(176, 196, 222)),
    ("lightyellow", Rgba::opaque(255, 255, 224)),
    ("lime", Rgba::opaque(0, 255, 0)),
    ("limegreen", Rgba::opaque(50, 205, 50)),
    ("linen", Rgba::opaque(250, 240, 230)),
    ("magenta", Rgba::opaque(255, 0, 255)),
    ("maroon", Rgba::opaque(128, 0, 0)),
    ("mediumaquamarine", Rgba::opaque(102, 205, 170)),
    ("mediumblue", Rgba::opaque(0, 0, 205)),
    ("mediumorchid", Rgba::opaque(186, 85, 211)),
    ("mediumpurple", Rgba::opaque(147, 112, 219)),
    ("mediumseagreen", Rgba::opaque(60, 179, 113)),
    ("mediumslateblue", Rgba::opaque(123, 104, 238)),
    ("mediumspringgreen", Rgba::opaque(0, 250, 154)),
    ("mediumturquoise", Rgba::opaque(72, 209, 204)),
    ("mediumvioletred", Rgba::opaque(199, 21, 133)),
    ("midnightblue", Rgba::opaque(25, 25, 112)),
    ("mintcream", Rgba::opaque(245, 255, 250)),
    ("mistyrose", Rgba::opaque(255, 228, 225)),
    ("moccasin", Rgba::opaque(255, 228, 181)),
    ("navajowhite", Rgba::opaque(255, 222, 173)),
    ("navy", Rgba::opaque(0, 0, 128)),
    ("oldlace", Rgba::opaque(253, 245, 230)),
    ("olive", Rgba::opaque(128, 128, 0)),
    ("olivedrab", Rgba::opaque(107, 142, 35)),
    ("orange", Rgba::opaque(255, 165, 0)),
    ("orangered", Rgba::opaque(255, 69, 0)),
    ("orchid", Rgba::opaque(218, 112, 214)),
    ("palegoldenrod", Rgba::opaque(238, 232, 170)),
    ("palegreen", Rgba::opaque(152, 251, 152)),
    ("paleturquoise", Rgba::opaque(175, 238, 238)),
    ("palevioletred", Rgba::opaque(219, 112, 147)),
    ("papayawhip", Rgba::opaque(255, 239, 213)),
    ("peachpuff", Rgba::opaque(255, 218, 185)),
    ("peru", Rgba::opaque(205, 133, 63)),
    ("pink", Rgba::opaque(255, 192, 203)),
    ("plum", Rgba::opaque(221, 160, 221)),
    ("powderblue", Rgba::opaque(176, 224, 230)),
    ("purple", Rgba::opaque(128, 0, 128)),
    ("rebeccapurple", Rgba::opaque(102, 51, 153)),
    ("red", Rgba::opaque(255, 0, 0)),
    ("rosybrown", Rgba::opaque(188, 143, 143)),
    ("royalblue", Rgba::opaque(65, 105, 225)),
    ("saddlebrown", Rgba::opaque(139, 69, 19)),
    ("salmon", Rgba::opaque(250, 128, 114)),
    ("sandybrown", Rgba::opaque(244, 164, 96)),
    ("seagreen", Rgba::opaque(46, 139, 87)),
    ("seashell", Rgba::opaque(255, 245, 238)),
    ("sienna", Rgba::opaque(160, 82, 45)),
    ("silver", Rgba::opaque(192, 192, 192)),
    ("skyblue", Rgba::opaque(135, 206, 235)),
    ("slateblue", Rgba::opaque(106, 90, 205)),
    ("slategray", Rgba::opaque(112, 128, 144)),
    ("slategrey", Rgba::opaque(112, 128, 144)),
    ("snow", Rgba::opaque(255, 250, 250)),
    ("springgreen", Rgba::opaque(0, 255, 127)),
    ("steelblue", Rgba::opaque(70, 130, 180)),
    ("tan", Rgba::opaque(210, 180, 140)),
    ("teal", Rgba::opaque(0, 128, 128)),
    ("thistle", Rgba::opaque(216, 191, 216)),
    ("tomato", Rgba::opaque(255, 99, 71)),
    ("turquoise", Rgba::opaque(64, 224, 208)),
    ("violet", Rgba::opaque(238, 130, 238)),
    ("wheat", Rgba::opaque(245, 222, 179)),
    ("white", Rgba::opaque(255, 255, 255)),
    ("whitesmoke", Rgba::opaque(245, 245, 245)),
    ("yellow", Rgba::opaque(255, 255, 0)),
    ("yellowgreen", Rgba::opaque(154, 205, 50)),
];

/// Look up a color by its lowercase name
pub fn named_color(name: &str) -> Option<Rgba> {
    NAMED_COLORS
        .binary_search_by(|(entry, _)| (*entry).cmp(name))
        .ok()
        .map(|index| NAMED_COLORS[index].1)
}
