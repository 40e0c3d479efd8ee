/* Lifetimes, labels and /* nested */ comments. */
struct Parser<'src> {
    text: &'src str,
}

impl<'src> Parser<'src> {
    fn first(&self) -> Option<char> {
        'outer: for ch in self.text.chars() {
            if ch == '(' || ch == '}' {
                break 'outer;
            }
        }
        self.text.chars().next()
    }
}
