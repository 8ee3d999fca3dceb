pub mod catppuccin {
    use nu_ansi_term::Color;

    use crate::program::Op;

    pub struct Mocha;

    impl Mocha {
        pub const TEXT: Color = Color::Rgb(205, 214, 244);
        pub const SURFACE2: Color = Color::Rgb(108, 112, 134);

        pub const RED: Color = Color::Rgb(243, 139, 168);
        pub const GREEN: Color = Color::Rgb(166, 227, 161);
        pub const YELLOW: Color = Color::Rgb(249, 226, 175);
        pub const MAUVE: Color = Color::Rgb(203, 166, 247);
        pub const PEACH: Color = Color::Rgb(250, 179, 135);
        pub const TEAL: Color = Color::Rgb(148, 226, 213);
        pub const SKY: Color = Color::Rgb(137, 220, 235);

        // > <   => SKY/TEAL (movement)
        // + -   => GREEN/SURFACE2 (data modification)
        // . ,   => YELLOW/PEACH (I/O)
        // [ ]   => MAUVE (flow control)
        pub fn op(op: Op) -> Color {
            match op {
                Op::Right => Self::SKY,
                Op::Left => Self::TEAL,
                Op::Inc => Self::GREEN,
                Op::Dec => Self::SURFACE2,
                Op::Output => Self::YELLOW,
                Op::Input => Self::PEACH,
                Op::LoopStart | Op::LoopEnd => Self::MAUVE,
            }
        }
    }
}
