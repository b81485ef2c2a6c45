//! Fila de processos prontos
//!
//! Lista duplamente encadeada, circular e ordenada por chave (prioridade),
//! guardada em uma arena de nós indexada por PID. Dois nós extras são as
//! sentinelas: `HEAD` (chave −∞) e `TAIL` (chave +∞).
//!
//! ```text
//!  HEAD <-> p7(3) <-> p2(3) <-> p9(4) <-> p4(5) <-> TAIL
//!   ^                                                 |
//!   +-------------------------------------------------+
//! ```
//!
//! Invariantes:
//! - chaves em ordem crescente de `HEAD` para `TAIL`;
//! - `HEAD.next == TAIL` se e somente se a fila está vazia;
//! - um PID aparece no máximo uma vez.
//!
//! Empates: a inserção para no primeiro nó com chave >= à nova, então o
//! recém-chegado fica à frente (lado da cabeça) dos iguais. Lida a partir da
//! cauda, a fila mostra os iguais em ordem de chegada, e `remove_last` tira
//! primeiro o mais antigo: é isso que dá round-robin entre prioridades iguais.

use crate::sched::config::{MAX_KEY, MIN_KEY, NPROC};
use crate::sys::{Pid, SchedError, SchedResult};

/// Índice da sentinela de cabeça
const HEAD: usize = NPROC;
/// Índice da sentinela de cauda
const TAIL: usize = NPROC + 1;
/// Total de nós na arena
const NQENT: usize = NPROC + 2;

/// Nó da fila (um por slot de processo, mais as sentinelas)
#[derive(Debug, Clone, Copy)]
struct QNode {
    key: i32,
    next: usize,
    prev: usize,
    /// O nó está encadeado (sentinelas nunca marcam)
    linked: bool,
}

impl QNode {
    const fn unlinked() -> Self {
        Self {
            key: 0,
            next: TAIL,
            prev: HEAD,
            linked: false,
        }
    }
}

/// Fila de prontos ordenada
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    nodes: [QNode; NQENT],
    len: usize,
}

impl ReadyQueue {
    pub fn new() -> Self {
        let mut nodes = [QNode::unlinked(); NQENT];
        nodes[HEAD] = QNode {
            key: MIN_KEY,
            next: TAIL,
            prev: TAIL,
            linked: false,
        };
        nodes[TAIL] = QNode {
            key: MAX_KEY,
            next: HEAD,
            prev: HEAD,
            linked: false,
        };
        Self { nodes, len: 0 }
    }

    /// Verifica se está vazia (`HEAD.next == TAIL`)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes[HEAD].next == TAIL
    }

    /// Número de processos na fila
    pub fn len(&self) -> usize {
        self.len
    }

    /// O PID está encadeado na fila?
    pub fn contains(&self, pid: Pid) -> bool {
        self.nodes
            .get(pid.index())
            .is_some_and(|n| pid.index() < NPROC && n.linked)
    }

    /// Chave com que o PID foi inserido
    pub fn key_of(&self, pid: Pid) -> Option<i32> {
        if self.contains(pid) {
            Some(self.nodes[pid.index()].key)
        } else {
            None
        }
    }

    /// Primeiro membro (menor chave)
    pub fn first(&self) -> Option<Pid> {
        let idx = self.nodes[HEAD].next;
        (idx != TAIL).then(|| Pid::from(idx))
    }

    /// Último membro (maior chave)
    pub fn last(&self) -> Option<Pid> {
        let idx = self.nodes[TAIL].prev;
        (idx != HEAD).then(|| Pid::from(idx))
    }

    /// Chave do último membro, ou `None` com a fila vazia.
    ///
    /// Usada pelo caminho rápido da classe Priority.
    pub fn highest_key(&self) -> Option<i32> {
        self.last().map(|pid| self.nodes[pid.index()].key)
    }

    /// Insere `pid` mantendo a ordem crescente de chave.
    ///
    /// Percorre a partir de `HEAD.next` enquanto a chave do nó é estritamente
    /// menor que `key` e encaixa o novo nó antes do primeiro com chave >= `key`.
    /// `TAIL` tem chave +∞, então o laço sempre termina nele.
    pub fn insert(&mut self, pid: Pid, key: i32) -> SchedResult<()> {
        let idx = pid.index();
        if idx >= NPROC {
            return Err(SchedError::ESRCH);
        }
        if self.nodes[idx].linked {
            crate::kwarn!("(RunQueue) insert de PID já encadeado:", pid.as_u32());
            return Err(SchedError::EBUSY);
        }

        let mut next = self.nodes[HEAD].next;
        let mut steps = 0usize;
        while next != TAIL && self.nodes[next].key < key {
            next = self.nodes[next].next;
            steps += 1;
            if steps > NPROC || next >= NQENT {
                crate::kerror!("(RunQueue) Encadeamento corrompido no insert, PID:", pid.as_u32());
                return Err(SchedError::ECORRUPT);
            }
        }

        let prev = self.nodes[next].prev;
        self.nodes[idx] = QNode {
            key,
            next,
            prev,
            linked: true,
        };
        self.nodes[prev].next = idx;
        self.nodes[next].prev = idx;
        self.len += 1;
        Ok(())
    }

    /// Remove o primeiro membro (lado da cabeça) em O(1)
    pub fn remove_first(&mut self) -> Option<Pid> {
        let pid = self.first()?;
        self.unlink(pid.index());
        Some(pid)
    }

    /// Remove o último membro (lado da cauda, maior chave) em O(1)
    pub fn remove_last(&mut self) -> Option<Pid> {
        let pid = self.last()?;
        self.unlink(pid.index());
        Some(pid)
    }

    /// Remove um membro arbitrário religando os vizinhos em O(1)
    pub fn remove(&mut self, pid: Pid) -> SchedResult<()> {
        if pid.index() >= NPROC {
            return Err(SchedError::ESRCH);
        }
        if !self.nodes[pid.index()].linked {
            return Err(SchedError::ESRCH);
        }

        let node = self.nodes[pid.index()];
        if node.prev >= NQENT
            || node.next >= NQENT
            || self.nodes[node.prev].next != pid.index()
            || self.nodes[node.next].prev != pid.index()
        {
            crate::kerror!("(RunQueue) Vizinhos inconsistentes no remove, PID:", pid.as_u32());
            return Err(SchedError::ECORRUPT);
        }

        self.unlink(pid.index());
        Ok(())
    }

    /// Primeiro membro (a partir da cabeça) com chave exatamente `key`
    pub fn first_with_key(&self, key: i32) -> Option<Pid> {
        self.iter().find(|&(_, k)| k == key).map(|(pid, _)| pid)
    }

    /// Membro mais antigo com chave exatamente `key`.
    ///
    /// Entre iguais o mais antigo é o mais próximo da cauda, então a varredura
    /// guarda o último casamento e para na primeira chave maior.
    pub fn oldest_with_key(&self, key: i32) -> Option<Pid> {
        let mut found = None;
        for (pid, k) in self.iter() {
            if k > key {
                break;
            }
            if k == key {
                found = Some(pid);
            }
        }
        found
    }

    /// Itera `(pid, chave)` de `HEAD` para `TAIL`
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            cursor: self.nodes[HEAD].next,
            remaining: NPROC,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let QNode { prev, next, .. } = self.nodes[idx];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx] = QNode::unlinked();
        self.len -= 1;
    }
}

impl Default for ReadyQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterador em ordem de chave crescente
pub struct Iter<'a> {
    queue: &'a ReadyQueue,
    cursor: usize,
    /// Limite de passos: uma fila corrompida (ciclo) não trava o kernel
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = (Pid, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL || self.cursor >= NPROC || self.remaining == 0 {
            return None;
        }
        let node = &self.queue.nodes[self.cursor];
        let item = (Pid::from(self.cursor), node.key);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(item)
    }
}
