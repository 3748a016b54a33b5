//! SVG 路径数据解析 - 把图标模板里的 d 属性转换为可光栅化的路径

use crate::Path;

/// 解析 SVG path 的 d 属性，支持 M/L/H/V/Z 及其相对形式
pub fn parse_path_data(d: &str) -> Result<Path, String> {
    let mut path = Path::new();
    let mut scanner = Scanner::new(d);
    // MoveTo 后的裸坐标对按 LineTo 处理
    let mut cmd = ' ';

    while let Some(next) = scanner.peek_command() {
        if let Some(c) = next {
            cmd = match c {
                'M' => 'M',
                'm' => 'm',
                'L' => 'L',
                'l' => 'l',
                'H' => 'H',
                'h' => 'h',
                'V' => 'V',
                'v' => 'v',
                'Z' | 'z' => {
                    path.close();
                    continue;
                }
                other => return Err(format!("Unsupported path command '{}'", other)),
            };
        } else if cmd == 'M' {
            cmd = 'L';
        } else if cmd == 'm' {
            cmd = 'l';
        }

        let cur = path.current_point();
        match cmd {
            'M' => {
                let (x, y) = scanner.pair()?;
                path.move_to(x, y);
            }
            'm' => {
                let (x, y) = scanner.pair()?;
                path.move_to(cur.x + x, cur.y + y);
            }
            'L' => {
                let (x, y) = scanner.pair()?;
                path.line_to(x, y);
            }
            'l' => {
                let (x, y) = scanner.pair()?;
                path.line_to(cur.x + x, cur.y + y);
            }
            'H' => {
                let x = scanner.number()?;
                path.line_to(x, cur.y);
            }
            'h' => {
                let x = scanner.number()?;
                path.line_to(cur.x + x, cur.y);
            }
            'V' => {
                let y = scanner.number()?;
                path.line_to(cur.x, y);
            }
            'v' => {
                let y = scanner.number()?;
                path.line_to(cur.x, cur.y + y);
            }
            _ => return Err("Path data must start with a move command".to_string()),
        }
    }

    Ok(path)
}

/// 解析 viewBox 属性: "min-x min-y width height"
pub fn parse_view_box(value: &str) -> Result<(f32, f32, f32, f32), String> {
    let parts: Vec<f32> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Invalid viewBox '{}': {}", value, e))?;

    if parts.len() != 4 {
        return Err(format!("viewBox expects 4 numbers, got {}", parts.len()));
    }

    Ok((parts[0], parts[1], parts[2], parts[3]))
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while self.pos < self.input.len() {
            let c = self.input[self.pos];
            if c.is_ascii_whitespace() || c == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// 下一段是命令字母返回 Some(Some(letter))，是数字返回 Some(None)，
    /// 输入结束返回 None
    fn peek_command(&mut self) -> Option<Option<char>> {
        self.skip_separators();
        if self.pos >= self.input.len() {
            return None;
        }
        let c = self.input[self.pos];
        if c.is_ascii_alphabetic() {
            self.pos += 1;
            Some(Some(c as char))
        } else {
            Some(None)
        }
    }

    fn number(&mut self) -> Result<f32, String> {
        self.skip_separators();
        let start = self.pos;

        if self.pos < self.input.len() && (self.input[self.pos] == b'-' || self.input[self.pos] == b'+') {
            self.pos += 1;
        }
        let mut seen_dot = false;
        while self.pos < self.input.len() {
            let c = self.input[self.pos];
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == b'.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        if start == self.pos {
            return Err("Expected number in path data".to_string());
        }

        std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|e| e.to_string())?
            .parse::<f32>()
            .map_err(|e| e.to_string())
    }

    fn pair(&mut self) -> Result<(f32, f32), String> {
        let x = self.number()?;
        let y = self.number()?;
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;

    #[test]
    fn test_parse_triangle() {
        let path = parse_path_data("M0,0 L10,0 L5,8 Z").unwrap();
        assert_eq!(path.commands().len(), 4);
        assert!(matches!(path.commands()[3], PathCommand::Close));
    }

    #[test]
    fn test_implicit_lineto_after_move() {
        // M 后面的裸坐标对按 L 处理
        let path = parse_path_data("M0,0 10,0 5,8Z").unwrap();
        assert_eq!(path.commands().len(), 4);
        assert!(matches!(path.commands()[1], PathCommand::LineTo(_)));
    }

    #[test]
    fn test_star_glyph_parses() {
        let d = "M28.39,33.12,17.67,27,6.93,33.12,10,20.94l-7.77-8.1H12.85L17.67,2.55l4.83,10.28H33.1l-7.78,8.1Z";
        let path = parse_path_data(d).unwrap();
        assert!(!path.is_empty());

        let (min_x, min_y, max_x, max_y) = path.bounds().unwrap();
        assert!(min_x >= 0.0 && min_y >= 0.0);
        assert!(max_x <= 35.0 && max_y <= 34.4);
    }

    #[test]
    fn test_relative_moveto_after_close() {
        // Z 之后画笔回到子路径起点，相对 m 以此为原点
        let path = parse_path_data("M0,0 L10,0 L10,10 L0,10 Z m1,1 l2,0").unwrap();
        match path.commands()[5] {
            PathCommand::MoveTo(p) => assert_eq!((p.x, p.y), (1.0, 1.0)),
            ref other => panic!("unexpected command: {:?}", other),
        }
        match path.commands()[6] {
            PathCommand::LineTo(p) => assert_eq!((p.x, p.y), (3.0, 1.0)),
            ref other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_relative_commands() {
        let path = parse_path_data("m1,1 l2,0 v2 h-2 z").unwrap();
        let (min_x, min_y, max_x, max_y) = path.bounds().unwrap();
        assert_eq!((min_x, min_y, max_x, max_y), (1.0, 1.0, 3.0, 3.0));
    }

    #[test]
    fn test_unsupported_command() {
        assert!(parse_path_data("M0,0 C1,1 2,2 3,3").is_err());
    }

    #[test]
    fn test_parse_view_box() {
        assert_eq!(parse_view_box("0 0 35 34.4").unwrap(), (0.0, 0.0, 35.0, 34.4));
        assert!(parse_view_box("0 0 35").is_err());
    }
}
