//! Built-in curriculum: topic table, lessons and code-arena challenges.
//!
//! Guarantees the app is useful without a content bank. Content bank entries
//! with the same id or slug take precedence over everything here.

use crate::domain::{Challenge, ContentSource, Difficulty, Lesson, TopicMeta};

fn topic(slug: &str, name: &str, icon: &str, color: &str, description: &str) -> TopicMeta {
  TopicMeta {
    slug: slug.into(),
    name: name.into(),
    icon: icon.into(),
    color: color.into(),
    description: description.into(),
  }
}

pub fn seed_topics() -> Vec<TopicMeta> {
  vec![
    topic("python", "Python", "🐍", "#3776AB", "Readable syntax, batteries included. A great first language."),
    topic("javascript", "JavaScript", "⚡", "#F7DF1E", "The language of the web: values, functions and the event loop."),
    topic("java", "Java", "☕", "#E76F00", "Classes, static types and the JVM."),
    topic("cpp", "C++", "⚙️", "#00599C", "Close to the metal: memory, pointers and zero-cost abstractions."),
    topic("algorithms", "Algorithms", "🧠", "#8B5CF6", "Searching, sorting and thinking about complexity."),
  ]
}

fn lesson(id: &str, topic: &str, order: u32, title: &str, difficulty: Difficulty, minutes: u32, content: &str) -> Lesson {
  Lesson {
    id: id.into(),
    topic: topic.into(),
    title: title.into(),
    difficulty,
    estimated_minutes: minutes,
    reward: difficulty.default_reward(),
    content: content.into(),
    order,
    source: ContentSource::Seed,
  }
}

pub fn seed_lessons() -> Vec<Lesson> {
  vec![
    lesson("py-variables", "python", 1, "Variables and Types", Difficulty::Beginner, 8, r#"# Variables and Types
A **variable** is a name bound to a value. Python figures out the type for you.

## Basic types
- `int` for whole numbers
- `float` for decimals
- `str` for text
- `bool` for `True` / `False`

```python
age = 12
name = "Ada"
print(name, "is", age)
```

Use `type(x)` to see what a value is."#),
    lesson("py-loops", "python", 2, "Loops", Difficulty::Beginner, 10, r#"# Loops
Loops repeat work. A `for` loop walks over any **iterable**.

```
for i in range(3):
    print(i)
```

A `while` loop keeps going as long as its condition holds.

```python
n = 3
while n > 0:
    n -= 1
```"#),
    lesson("py-functions", "python", 3, "Functions", Difficulty::Intermediate, 15, r#"# Functions
Functions package logic behind a name.

### Defining one
```python
def greet(name):
    return f"Hello, {name}!"
```

- Parameters are **local** to the function
- `return` hands a value back to the caller"#),
    lesson("js-basics", "javascript", 1, "Values and Variables", Difficulty::Beginner, 8, r#"# Values and Variables
Prefer `const`, reach for `let` when a binding must change, and avoid `var`.

```
const greeting = "hi";
let count = 0;
console.log(greeting, count);
```"#),
    lesson("js-functions", "javascript", 2, "Arrow Functions", Difficulty::Intermediate, 12, r#"# Arrow Functions
Arrow functions are **short** and capture `this` from where they are written.

```javascript
const double = (x) => x * 2;
[1, 2, 3].map(double);
```"#),
    lesson("java-classes", "java", 1, "Classes and Objects", Difficulty::Beginner, 12, r#"# Classes and Objects
Everything in Java lives inside a **class**.

```java
public class Counter {
    private int value;
    public void increment() { value++; }
}
```

## Creating objects
Use `new` to build an instance."#),
    lesson("cpp-hello", "cpp", 1, "Hello, C++", Difficulty::Beginner, 10, r#"# Hello, C++
Every program starts at `main`.

```
#include <iostream>
int main() {
    std::cout << "Hello" << std::endl;
}
```

- `#include` pulls in a header
- `std::cout` writes to standard output"#),
    lesson("cpp-pointers", "cpp", 2, "Pointers", Difficulty::Advanced, 20, r#"# Pointers
A pointer stores an **address**. Dereference it with `*` to reach the value.

```cpp
int x = 5;
int* p = &x;
*p = 7;
```"#),
    lesson("algo-big-o", "algorithms", 1, "Big-O Notation", Difficulty::Intermediate, 15, r#"# Big-O Notation
Big-O describes how work **grows** with input size.

- `O(1)` constant
- `O(log n)` logarithmic
- `O(n)` linear
- `O(n^2)` quadratic

Binary search halves the range every step, so it runs in `O(log n)`."#),
  ]
}

#[allow(clippy::too_many_arguments)]
fn challenge(
  id: &str,
  topic: &str,
  order: u32,
  title: &str,
  difficulty: Difficulty,
  minutes: u32,
  description: &str,
  language: &str,
  starter_code: &str,
) -> Challenge {
  Challenge {
    id: id.into(),
    topic: topic.into(),
    title: title.into(),
    difficulty,
    estimated_minutes: minutes,
    reward: difficulty.default_reward(),
    description: description.into(),
    starter_code: Some(starter_code.into()),
    language: Some(language.into()),
    order,
    source: ContentSource::Seed,
  }
}

pub fn seed_challenges() -> Vec<Challenge> {
  vec![
    challenge(
      "arena-py-fizzbuzz", "python", 1, "FizzBuzz", Difficulty::Beginner, 10,
      "Print the numbers **1 to 100**. For multiples of 3 print `Fizz`, of 5 print `Buzz`, of both print `FizzBuzz`.",
      "python", "def fizzbuzz(n):\n    pass\n",
    ),
    challenge(
      "arena-py-palindrome", "python", 2, "Palindrome Check", Difficulty::Intermediate, 15,
      "Return `True` when a string reads the same **forwards and backwards**, ignoring case.",
      "python", "def is_palindrome(s):\n    pass\n",
    ),
    challenge(
      "arena-js-sum", "javascript", 1, "Sum an Array", Difficulty::Beginner, 8,
      "Write `sum(xs)` returning the total of a number array. An empty array sums to `0`.",
      "javascript", "function sum(xs) {\n}\n",
    ),
    challenge(
      "arena-java-reverse", "java", 1, "Reverse a String", Difficulty::Beginner, 10,
      "Implement `reverse(String s)` without using `StringBuilder.reverse`.",
      "java", "public static String reverse(String s) {\n    return s;\n}\n",
    ),
    challenge(
      "arena-cpp-swap", "cpp", 1, "Swap via Pointers", Difficulty::Intermediate, 12,
      "Swap two integers through **pointers**.",
      "cpp", "void swap(int* a, int* b) {\n}\n",
    ),
    challenge(
      "arena-algo-binary-search", "algorithms", 1, "Binary Search", Difficulty::Advanced, 25,
      "Given a **sorted** array, return the index of `target` or `-1`. Aim for `O(log n)`.",
      "python", "def binary_search(xs, target):\n    return -1\n",
    ),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  use crate::markdown::{render, Node};

  #[test]
  fn ids_and_slugs_are_unique() {
    let lessons: HashSet<_> = seed_lessons().into_iter().map(|l| l.id).collect();
    assert_eq!(lessons.len(), seed_lessons().len());
    let challenges: HashSet<_> = seed_challenges().into_iter().map(|c| c.id).collect();
    assert_eq!(challenges.len(), seed_challenges().len());
    let slugs: HashSet<_> = seed_topics().into_iter().map(|t| t.slug).collect();
    assert_eq!(slugs.len(), seed_topics().len());
  }

  #[test]
  fn every_seed_belongs_to_a_seeded_topic() {
    let slugs: HashSet<_> = seed_topics().into_iter().map(|t| t.slug).collect();
    assert!(seed_lessons().iter().all(|l| slugs.contains(&l.topic)));
    assert!(seed_challenges().iter().all(|c| slugs.contains(&c.topic)));
  }

  #[test]
  fn untagged_seed_fences_infer_their_language() {
    let code_langs = |id: &str| -> Vec<String> {
      let lesson = seed_lessons().into_iter().find(|l| l.id == id).unwrap();
      render(&lesson.content)
        .into_iter()
        .filter_map(|n| match n {
          Node::Code { language, .. } => Some(language),
          _ => None,
        })
        .collect()
    };
    assert_eq!(code_langs("py-loops"), vec!["python", "python"]);
    assert_eq!(code_langs("js-basics"), vec!["javascript"]);
    assert_eq!(code_langs("cpp-hello"), vec!["cpp"]);
  }
}
